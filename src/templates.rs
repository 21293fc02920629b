//! HTML page rendering with Tera.
//!
//! Templates are compiled into the binary so the server does not depend on
//! its working directory. Both names end in `.html`, which turns on Tera's
//! auto-escaping for every interpolated value.

use tera::{Context, Tera};

use crate::domain::Record;
use crate::error::GatewayError;

/// Template name of the submission form.
pub const FORM_TEMPLATE: &str = "form.html";
/// Template name of the record listing.
pub const LIST_TEMPLATE: &str = "list.html";

const FORM_SOURCE: &str = include_str!("../templates/form.html");
const LIST_SOURCE: &str = include_str!("../templates/list.html");

/// Compiled page templates.
#[derive(Debug, Clone)]
pub struct Pages {
    tera: Tera,
}

impl Pages {
    /// Compiles the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Template`] if a template fails to parse.
    pub fn new() -> Result<Self, GatewayError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(FORM_TEMPLATE, FORM_SOURCE), (LIST_TEMPLATE, LIST_SOURCE)])?;
        Ok(Self { tera })
    }

    /// Renders the submission form.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Template`] on render failure.
    pub fn form(&self) -> Result<String, GatewayError> {
        Ok(self.tera.render(FORM_TEMPLATE, &Context::new())?)
    }

    /// Renders the table of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Template`] on render failure.
    pub fn list(&self, records: &[Record]) -> Result<String, GatewayError> {
        let mut context = Context::new();
        context.insert("records", records);
        Ok(self.tera.render(LIST_TEMPLATE, &context)?)
    }
}
