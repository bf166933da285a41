//! Contact form submissions forwarded as a WhatsApp deep link.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static MOBILE_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user agent pattern is valid")
});

const PROGRAMS: &[(&str, &str)] = &[
    ("she-closer", "SHE CLOSER - Entrenamiento para mujeres"),
    ("he-closer", "HE CLOSER - Entrenamiento para hombres"),
    ("cerradores-elite", "CERRADORES ÉLITE - Clínica de ventas"),
    ("closers-hub", "CLOSERS HUB - Agencia de ventas"),
    ("todos", "Todos los programas"),
];

const SIGNATURE: &str = "_Enviado desde escuelaven7as.com_";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `wa.me`, opens the app
    Mobile,
    /// WhatsApp Web
    Desktop,
}

impl Endpoint {
    pub fn for_user_agent(user_agent: &str) -> Self {
        if is_mobile_user_agent(user_agent) {
            Endpoint::Mobile
        } else {
            Endpoint::Desktop
        }
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_AGENT.is_match(user_agent)
}

/// Readable program name for a `<select>` value. Unknown keys pass through.
pub fn program_label(key: &str) -> &str {
    PROGRAMS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub program: String,
}

impl ContactRequest {
    pub fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            company: self.company.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            program: self.program,
        }
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        let required = [
            ("first_name", &self.first_name),
            ("phone", &self.phone),
            ("email", &self.email),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(name));
            }
        }
        Ok(())
    }

    /// The chat message, WhatsApp markdown included. Company is omitted when empty.
    pub fn message(&self) -> String {
        let mut message = String::from(" *SOLICITUD DE INFORMACIÓN*\n\n");
        message.push_str(&format!(
            " *Nombre:* {} {}\n",
            self.first_name, self.last_name
        ));
        if !self.company.is_empty() {
            message.push_str(&format!(" *Empresa:* {}\n", self.company));
        }
        message.push_str(&format!(" *Teléfono:* {}\n", self.phone));
        message.push_str(&format!(" *Email:* {}\n", self.email));
        message.push_str(&format!(
            " *Programa de interés:* {}\n\n",
            program_label(&self.program)
        ));
        message.push_str(SIGNATURE);
        message
    }

    /// Trims, validates and builds the deep link in one go.
    pub fn into_link(self, number: &str, endpoint: Endpoint) -> Result<String, ContactError> {
        let request = self.trimmed();
        request.validate()?;
        Ok(whatsapp_url(number, &request.message(), endpoint))
    }
}

pub fn whatsapp_url(number: &str, message: &str, endpoint: Endpoint) -> String {
    let text = encode_uri_component(message);
    match endpoint {
        Endpoint::Mobile => format!("https://wa.me/{number}?text={text}"),
        Endpoint::Desktop => {
            format!("https://web.whatsapp.com/send?phone={number}&text={text}")
        }
    }
}

/// Percent-encoding with the browser's `encodeURIComponent` unreserved set,
/// which also leaves `!'()*` alone.
pub fn encode_uri_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}
