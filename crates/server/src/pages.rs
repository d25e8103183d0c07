//! Inline HTML rendering. Deliberately a thin wrapper: no templating
//! engine, just `format!` around the handful of views this demo has.

use gatehouse_auth::Identity;
use gatehouse_auth::Member;
use gatehouse_core::Unique;

/// Minimal HTML escaping for user-supplied text.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape(title),
        body
    )
}

fn alert(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape(message)),
        None => String::new(),
    }
}

pub fn index() -> String {
    shell(
        "Welcome",
        "<h1>Welcome</h1>\n\
         <p><a href=\"/login\">Log in</a> or <a href=\"/signup\">Sign up</a></p>",
    )
}

pub fn login(error: Option<&str>) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{}\
         <form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p><a href=\"/signup\">Need an account? Sign up</a></p>",
        alert(error)
    );
    shell("Log in", &body)
}

pub fn signup(error: Option<&str>) -> String {
    let body = format!(
        "<h1>Sign up</h1>\n{}\
         <form method=\"post\" action=\"/signup\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label><br>\n\
         <label>Username <input type=\"text\" name=\"username\"></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Sign up</button>\n\
         </form>\n\
         <p><a href=\"/login\">Already registered? Log in</a></p>",
        alert(error)
    );
    shell("Sign up", &body)
}

/// Landing view. Everyone sees their own name and role; admins also
/// get the full roster, emails included.
pub fn landing(identity: &Identity, roster: Option<&[Member]>) -> String {
    let mut body = format!(
        "<h1>Welcome, {}</h1>\n\
         <p>You are logged in as <strong>{}</strong>.</p>\n",
        escape(identity.username()),
        identity.role()
    );
    if let Some(members) = roster {
        body.push_str("<h2>All users</h2>\n<table>\n<tr><th>ID</th><th>Username</th><th>Email</th><th>Role</th></tr>\n");
        for member in members {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                member.id(),
                escape(member.username()),
                escape(member.email()),
                member.role()
            ));
        }
        body.push_str("</table>\n");
    }
    body.push_str("<p><a href=\"/logout\">Log out</a></p>");
    shell("Landing", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_auth::Role;
    use gatehouse_core::ID;

    fn member(id: u64, name: &str, role: Role) -> Member {
        Member::new(
            ID::from(id),
            name.to_string(),
            format!("{}@example.com", name),
            role,
        )
    }

    #[test]
    fn escapes_markup_in_usernames() {
        let sneaky = member(1, "<script>alert(1)</script>", Role::User);
        let html = landing(&Identity::from(&sneaky), None);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn admin_landing_lists_roster() {
        let admin = member(1, "root", Role::Admin);
        let all = vec![admin.clone(), member(2, "guest", Role::User)];
        let html = landing(&Identity::from(&admin), Some(&all));
        assert!(html.contains("guest@example.com"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn user_landing_shows_only_self() {
        let user = member(2, "guest", Role::User);
        let html = landing(&Identity::from(&user), None);
        assert!(html.contains("guest"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn forms_render_errors_when_present() {
        assert!(!login(None).contains("class=\"error\""));
        assert!(login(Some("Invalid email or password")).contains("Invalid email or password"));
        assert!(signup(Some("Email already registered")).contains("Email already registered"));
    }
}
