use super::handlers::{health, me, signin, signup};
use utoipa::openapi::{
    Contact, InfoBuilder, License, OpenApiBuilder, Tag,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Routes added outside (like `/` or `OPTIONS /health`) are not documented.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(signup::signup))
        .routes(routes!(signin::signin))
        .routes(routes!(me::me));

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Liveness and dependency status".to_string());

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Registration, sign-in and token introspection".to_string());

    let openapi = router.get_openapi_mut();
    openapi.tags = Some(vec![health_tag, auth_tag]);
    if let Some(components) = openapi.components.as_mut() {
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();

    OpenApiBuilder::new()
        .info(info)
        .components(Some(utoipa::openapi::Components::new()))
        .build()
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    if let Some(start) = author.find('<') {
        let name = author[..start].trim();
        let email = author[start + 1..].trim_end_matches('>').trim();
        (
            (!name.is_empty()).then_some(name),
            (!email.is_empty()).then_some(email),
        )
    } else {
        let name = author.trim();
        ((!name.is_empty()).then_some(name), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));

        let contact = spec.info.contact;
        assert!(contact.is_some());
        if let Some(contact) = contact {
            assert_eq!(contact.name.as_deref(), Some("Team Tessera"));
            assert_eq!(contact.email.as_deref(), Some("team@tessera.dev"));
        }

        let license = spec.info.license;
        assert!(license.is_some());
        if let Some(license) = license {
            assert_eq!(license.identifier.as_deref(), Some("BSD-3-Clause"));
        }
    }

    #[test]
    fn openapi_documents_every_route() {
        let spec = openapi();
        for path in ["/health", "/signup", "/signin", "/me"] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "health"));
    }

    #[test]
    fn openapi_declares_bearer_scheme() {
        let spec = openapi();
        let schemes = spec
            .components
            .map(|components| components.security_schemes)
            .unwrap_or_default();
        assert!(schemes.contains_key("bearer"));
    }

    #[test]
    fn parse_author_variants() {
        assert_eq!(
            parse_author("Jane Doe <jane@example.com>"),
            (Some("Jane Doe"), Some("jane@example.com"))
        );
        assert_eq!(parse_author("Jane Doe"), (Some("Jane Doe"), None));
        assert_eq!(parse_author("<jane@example.com>"), (None, Some("jane@example.com")));
    }
}
