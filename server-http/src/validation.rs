use crate::models::LeadRequest;
use waitlist::domain::Lead;

#[derive(Debug, Eq, PartialEq)]
pub enum ValidationError {
    MissingRequiredField { field: &'static str },
    InvalidEmail,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingRequiredField { field } => {
                write!(f, "Missing required field '{}'", field)
            }
            ValidationError::InvalidEmail => {
                write!(f, "Invalid email address")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a raw signup request into a domain lead.
pub fn validate(req: LeadRequest) -> Result<Lead, ValidationError> {
    let required = [
        ("name", &req.name),
        ("email", &req.email),
        ("company", &req.company),
        ("industry", &req.industry),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField { field });
        }
    }

    let email = req.email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err(ValidationError::InvalidEmail),
    }

    Ok(Lead {
        name: req.name,
        email: req.email,
        company: req.company,
        industry: req.industry,
        country: req.country,
        language: req.language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::company::en::CompanyName;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn request() -> LeadRequest {
        LeadRequest {
            name: Name().fake(),
            email: SafeEmail().fake(),
            company: CompanyName().fake(),
            industry: "technology".to_string(),
            country: None,
            language: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let req = request();
        let email = req.email.clone();

        let lead = validate(req).unwrap();
        assert_eq!(lead.email, email);
    }

    #[test]
    fn test_blank_required_fields_rejected() {
        for field in ["name", "email", "company", "industry"] {
            let mut req = request();
            match field {
                "name" => req.name = "   ".to_string(),
                "email" => req.email = String::new(),
                "company" => req.company = String::new(),
                _ => req.industry = String::new(),
            }

            assert_eq!(
                validate(req),
                Err(ValidationError::MissingRequiredField { field })
            );
        }
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        assert_eq!(validate(req), Err(ValidationError::InvalidEmail));

        let mut req = request();
        req.email = "@example.com".to_string();
        assert_eq!(validate(req), Err(ValidationError::InvalidEmail));

        let mut req = request();
        req.email = "ada@nodot".to_string();
        assert_eq!(validate(req), Err(ValidationError::InvalidEmail));
    }
}
