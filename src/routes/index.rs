use actix_web::{get, http::header, HttpResponse, Responder};

pub const LOGIN_PAGE: &str = "/login.html";

/// Sends visitors of the bare root to the login page.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Found()
        .insert_header((header::LOCATION, LOGIN_PAGE))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn test_root_redirects_to_login() {
        let app = test::init_service(actix_web::App::new().service(index)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            LOGIN_PAGE
        );
    }
}
