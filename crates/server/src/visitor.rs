use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use gatehouse_auth::Identity;
use gatehouse_auth::Sessions;
use gatehouse_auth::Token;
use std::future::Future;
use std::pin::Pin;

/// Cookie name carrying the session token.
pub const COOKIE: &str = "session";

/// Extractor resolving the request's session cookie to an identity.
/// Never fails: requests without a cookie, with an unparseable token,
/// or with a token the session table does not know all arrive as
/// `Visitor(None)`.
pub struct Visitor(pub Option<(Token, Identity)>);

impl Visitor {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref().map(|(_, identity)| identity)
    }
    pub fn token(&self) -> Option<&Token> {
        self.0.as_ref().map(|(token, _)| token)
    }
}

impl FromRequest for Visitor {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let sessions = req.app_data::<web::Data<Sessions>>().cloned();
        let token = req
            .cookie(COOKIE)
            .and_then(|c| c.value().parse::<Token>().ok());
        Box::pin(async move {
            let (Some(sessions), Some(token)) = (sessions, token) else {
                return Ok(Visitor(None));
            };
            Ok(Visitor(
                sessions.get(&token).await.map(|identity| (token, identity)),
            ))
        })
    }
}
