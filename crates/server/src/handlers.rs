use super::*;
use crate::visitor::COOKIE;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::cookie::Cookie;
use actix_web::http::header;
use gatehouse_auth::AuthError;
use gatehouse_auth::LoginForm;
use gatehouse_auth::SignupForm;
use gatehouse_auth::flow;

fn redirect(to: &'static str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, to))
        .finish()
}

fn page(html: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// GET / — public index, unless a session already exists.
pub async fn index(visitor: Visitor) -> impl Responder {
    match visitor.identity() {
        Some(_) => redirect("/landing"),
        None => page(pages::index()),
    }
}

/// GET /login
pub async fn login_form() -> impl Responder {
    page(pages::login(None))
}

/// POST /login — on success, bind the fresh token to a cookie.
pub async fn login(
    roster: web::Data<Roster>,
    sessions: web::Data<Sessions>,
    form: web::Form<LoginForm>,
) -> impl Responder {
    match flow::login(&roster, &sessions, &form.email, &form.password).await {
        Ok(token) => HttpResponse::Found()
            .insert_header((header::LOCATION, "/landing"))
            .cookie(
                Cookie::build(COOKIE, token.to_string())
                    .path("/")
                    .http_only(true)
                    .finish(),
            )
            .finish(),
        Err(e @ AuthError::InvalidCredentials) => page(pages::login(Some(&e.to_string()))),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// GET /signup
pub async fn signup_form() -> impl Responder {
    page(pages::signup(None))
}

/// POST /signup
pub async fn signup(roster: web::Data<Roster>, form: web::Form<SignupForm>) -> impl Responder {
    match flow::signup(&roster, &form.username, &form.email, &form.password).await {
        Ok(_) => redirect("/login"),
        Err(e @ AuthError::DuplicateEmail) => page(pages::signup(Some(&e.to_string()))),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// GET /landing — the gated view. Admins get the full roster.
pub async fn landing(roster: web::Data<Roster>, visitor: Visitor) -> impl Responder {
    let Some(identity) = visitor.identity() else {
        return redirect("/login");
    };
    match identity.role().is_admin() {
        true => page(pages::landing(identity, Some(&roster.all().await))),
        false => page(pages::landing(identity, None)),
    }
}

/// GET /logout — destroy the session (if any) and clear the cookie.
pub async fn logout(sessions: web::Data<Sessions>, visitor: Visitor) -> impl Responder {
    if let Some(token) = visitor.token() {
        flow::logout(&sessions, token).await;
    }
    let mut stale = Cookie::new(COOKIE, "");
    stale.set_path("/");
    stale.make_removal();
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(stale)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(Roster::seeded().await.unwrap()))
                    .app_data(web::Data::new(Sessions::new()))
                    .configure(crate::routes),
            )
            .await
        };
    }

    fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
    }

    async fn sign_in(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        email: &str,
        password: &str,
    ) -> Cookie<'static> {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", email), ("password", password)])
            .to_request();
        let resp = test::call_service(app, req).await;
        assert!(resp.status().is_redirection());
        assert!(location(&resp) == "/landing");
        resp.response()
            .cookies()
            .next()
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn landing_without_session_redirects_to_login() {
        let app = app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/landing").to_request())
            .await;
        assert!(resp.status().is_redirection());
        assert!(location(&resp) == "/login");
    }

    #[actix_web::test]
    async fn index_is_public_until_logged_in() {
        let app = app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
        let cookie = sign_in(&app, "user@example.com", "user123").await;
        let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_redirection());
        assert!(location(&resp) == "/landing");
    }

    #[actix_web::test]
    async fn admin_landing_lists_every_account() {
        let app = app!();
        let cookie = sign_in(&app, "admin@example.com", "admin123").await;
        let req = test::TestRequest::get()
            .uri("/landing")
            .cookie(cookie)
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("AdminUser"));
        assert!(html.contains("user@example.com"));
        assert!(html.contains("RegularUser"));
    }

    #[actix_web::test]
    async fn user_landing_shows_only_their_own_account() {
        let app = app!();
        let cookie = sign_in(&app, "user@example.com", "user123").await;
        let req = test::TestRequest::get()
            .uri("/landing")
            .cookie(cookie)
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("RegularUser"));
        assert!(!html.contains("admin@example.com"));
    }

    #[actix_web::test]
    async fn bad_password_rerenders_login_without_cookie() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", "user@example.com"), ("password", "wrong")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert!(resp.response().cookies().next().is_none());
        let html_bytes = test::read_body(resp).await;
        let html = std::str::from_utf8(&html_bytes).unwrap();
        assert!(html.contains("Invalid email or password"));
    }

    #[actix_web::test]
    async fn signup_then_login() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/signup")
            .set_form([
                ("email", "new@example.com"),
                ("username", "Newcomer"),
                ("password", "swordfish"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_redirection());
        assert!(location(&resp) == "/login");
        sign_in(&app, "new@example.com", "swordfish").await;
    }

    #[actix_web::test]
    async fn duplicate_signup_rerenders_with_error() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/signup")
            .set_form([
                ("email", "admin@example.com"),
                ("username", "Impostor"),
                ("password", "whatever"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Email already registered"));
    }

    #[actix_web::test]
    async fn missing_form_fields_arrive_as_empty_strings() {
        // no validation by design: an empty login is just bad credentials
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", "user@example.com")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body)
            .unwrap()
            .contains("Invalid email or password"));
    }

    #[actix_web::test]
    async fn logout_is_idempotent_and_clears_the_cookie() {
        let app = app!();
        let cookie = sign_in(&app, "user@example.com", "user123").await;
        let req = test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_redirection());
        assert!(location(&resp) == "/");
        // second logout with no live session behaves identically
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/logout").to_request(),
        )
        .await;
        assert!(resp.status().is_redirection());
        assert!(location(&resp) == "/");
        // and the old cookie no longer opens the gate
        let req = test::TestRequest::get()
            .uri("/landing")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(location(&resp) == "/login");
    }
}
