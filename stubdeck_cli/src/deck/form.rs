//! Creation form

use serde_json::{Map, Value};
use stubdeck_common::{NewMapping, NewRequest, NewResponse, UrlMatch};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Invalid status code: {0:?}")]
    InvalidStatus(String),

    #[error("Invalid headers JSON: {0}")]
    InvalidHeaders(#[from] serde_json::Error),

    #[error("Headers must be a JSON object")]
    HeadersNotObject,
}

/// Form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Method,
    Url,
    Status,
    Headers,
    Body,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Method,
        FormField::Url,
        FormField::Status,
        FormField::Headers,
        FormField::Body,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Method => "Method",
            FormField::Url => "URL",
            FormField::Status => "Status",
            FormField::Headers => "Headers (JSON)",
            FormField::Body => "Body",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Name => "optional",
            FormField::Method => "GET",
            FormField::Url => "/ or regex:^/api/.*$",
            FormField::Status => "200",
            FormField::Headers => "{}",
            FormField::Body => "",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw text of the creation form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateForm {
    pub name: String,
    pub method: String,
    pub url: String,
    pub status: String,
    pub headers: String,
    pub body: String,
}

impl CreateForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Method => &self.method,
            FormField::Url => &self.url,
            FormField::Status => &self.status,
            FormField::Headers => &self.headers,
            FormField::Body => &self.body,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Method => &mut self.method,
            FormField::Url => &mut self.url,
            FormField::Status => &mut self.status,
            FormField::Headers => &mut self.headers,
            FormField::Body => &mut self.body,
        }
    }

    /// Build the mapping to create
    ///
    /// Empty fields fall back to `GET`, `/`, `200` and `{}`. A url starting
    /// with `regex:` becomes a `urlPattern`.
    pub fn to_payload(&self) -> Result<NewMapping, FormError> {
        let name = self.name.trim();
        let method = if self.method.is_empty() {
            "GET".to_string()
        } else {
            self.method.to_uppercase()
        };
        let url = if self.url.is_empty() { "/" } else { &self.url };

        let status = if self.status.is_empty() {
            200
        } else {
            self.status
                .trim()
                .parse()
                .map_err(|_| FormError::InvalidStatus(self.status.clone()))?
        };

        let headers = if self.headers.is_empty() {
            Map::new()
        } else {
            match serde_json::from_str(&self.headers)? {
                Value::Object(map) => map,
                _ => return Err(FormError::HeadersNotObject),
            }
        };

        Ok(NewMapping {
            name: (!name.is_empty()).then(|| name.to_string()),
            request: NewRequest {
                method,
                url: UrlMatch::parse(url),
            },
            response: NewResponse {
                status,
                headers,
                body: self.body.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let payload = CreateForm::default().to_payload().unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "request": { "method": "GET", "url": "/" },
                "response": { "status": 200, "headers": {}, "body": "" }
            })
        );
    }

    #[test]
    fn test_regex_url() {
        let form = CreateForm {
            url: "regex:^/api/.*$".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(form.to_payload().unwrap()).unwrap();
        assert_eq!(value["request"]["urlPattern"], "^/api/.*$");
        assert!(value["request"].get("url").is_none());
    }

    #[test]
    fn test_plain_url() {
        let form = CreateForm {
            url: "/plain".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(form.to_payload().unwrap()).unwrap();
        assert_eq!(value["request"]["url"], "/plain");
        assert!(value["request"].get("urlPattern").is_none());
    }

    #[test]
    fn test_fields_are_normalized() {
        let form = CreateForm {
            name: "  users  ".to_string(),
            method: "post".to_string(),
            url: "/users".to_string(),
            status: " 201 ".to_string(),
            headers: r#"{"Content-Type":"application/json"}"#.to_string(),
            body: "  {\"ok\":true}  ".to_string(),
        };
        let payload = form.to_payload().unwrap();

        assert_eq!(payload.name.as_deref(), Some("users"));
        assert_eq!(payload.request.method, "POST");
        assert_eq!(payload.response.status, 201);
        assert_eq!(payload.response.headers["Content-Type"], "application/json");
        // Body is raw text, untouched
        assert_eq!(payload.response.body, "  {\"ok\":true}  ");
    }

    #[test]
    fn test_bad_input() {
        let bad_status = CreateForm {
            status: "two hundred".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad_status.to_payload(),
            Err(FormError::InvalidStatus(_))
        ));

        let bad_headers = CreateForm {
            headers: "{ nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad_headers.to_payload(),
            Err(FormError::InvalidHeaders(_))
        ));

        let array_headers = CreateForm {
            headers: "[]".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            array_headers.to_payload(),
            Err(FormError::HeadersNotObject)
        ));
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(FormField::Name.next(), FormField::Method);
        assert_eq!(FormField::Body.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Body);
    }
}
