use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;

/// Security headers middleware for content-type protection and other security measures
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let security_headers = get_security_headers();

    let headers = response.headers_mut();
    for (name, value) in security_headers {
        if let (Ok(header_name), Ok(header_value)) =
            (HeaderName::try_from(name), HeaderValue::try_from(value))
        {
            headers.insert(header_name, header_value);
        } else {
            tracing::warn!("Failed to add security header: {} = {}", name, value);
        }
    }

    response
}

fn get_security_headers() -> HashMap<&'static str, &'static str> {
    let mut headers = HashMap::new();

    // Prevent MIME type sniffing
    headers.insert("X-Content-Type-Options", "nosniff");

    // Prevent clickjacking
    headers.insert("X-Frame-Options", "DENY");

    // Control referrer information
    headers.insert("Referrer-Policy", "strict-origin-when-cross-origin");

    // Strict Transport Security (HTTPS only)
    headers.insert(
        "Strict-Transport-Security",
        "max-age=31536000; includeSubDomains",
    );

    headers
}
