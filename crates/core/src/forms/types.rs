//! Typed records, one per form, holding exactly the persisted columns.

use chrono::NaiveDate;
use serde::Serialize;
use validator::Validate;

use super::error::FormError;
use super::fields::FormFields;
use super::kind::FormKind;

/// Consent checkbox shared by every financial form.
const CONSENT_FIELD: &str = "fondos_licitos";

/// Company KYB registration, columns of `registros_market`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct CompanyRegistration {
    /// Legal name.
    pub nombre_empresa: String,
    /// Tax ID (form field `cuit_empresa`).
    pub cuit: Option<String>,
    /// Registered address (form field `direccion_sede`).
    pub direccion: Option<String>,
    /// Contact e-mail (form field `email_empresa`).
    #[validate(email)]
    pub email: Option<String>,
    /// Phone (form field `telefono_empresa`).
    pub telefono: Option<String>,
    /// Website.
    pub sitio_web: Option<String>,
    /// Declared lawful origin of funds.
    pub fondos_licitos: bool,
}

/// Which form an individual application came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationChannel {
    /// Full KYC form with identity documents.
    Kyc,
    /// Short token purchase interest form.
    SolicitudToken,
}

impl ApplicationChannel {
    /// Value stored in the `origen` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kyc => "kyc",
            Self::SolicitudToken => "solicitud_token",
        }
    }
}

/// Individual KYC or token request, columns of `solicitudes_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct IndividualApplication {
    /// Form the application came through.
    pub origen: ApplicationChannel,
    /// First name.
    pub nombre: String,
    /// Last name.
    pub apellido: String,
    /// ID or tax number (form fields `numero_documento` or `cuit_cuil`).
    pub numero_documento: Option<String>,
    /// Date of birth.
    pub fecha_nacimiento: Option<NaiveDate>,
    /// Nationality.
    pub nacionalidad: Option<String>,
    /// Address (form fields `direccion` or `domicilio`).
    pub direccion: Option<String>,
    /// Contact e-mail.
    #[validate(email)]
    pub email: String,
    /// Phone.
    pub telefono: Option<String>,
    /// Source of income.
    pub fuente_ingresos: Option<String>,
    /// Intended investment.
    pub capital_inversion: Option<String>,
    /// Why the services are needed.
    pub justificacion_servicios: Option<String>,
    /// Sworn statement on the origin of funds.
    pub dj_origen_fondos: Option<String>,
    /// Declared lawful origin of funds.
    pub fondos_licitos: bool,
    /// Politically exposed person declaration.
    pub pep_status: Option<String>,
}

/// Contact request, columns of `contactos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ContactRequest {
    /// Company name.
    pub nombre_empresa: String,
    /// Contact e-mail.
    #[validate(email)]
    pub email: String,
    /// Phone.
    pub telefono: Option<String>,
}

/// Whoever should get the confirmation email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Address.
    pub email: String,
    /// Name used in the greeting.
    pub display_name: String,
}

/// A validated form, tagged by its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Form {
    /// Company registration.
    Company(CompanyRegistration),
    /// Individual KYC or token request.
    Individual(IndividualApplication),
    /// Contact request.
    Contact(ContactRequest),
}

impl Form {
    /// Whitelist, rename and coerce the submitted fields for `kind`.
    pub fn parse(kind: FormKind, fields: &FormFields) -> Result<Self, FormError> {
        let form = match kind {
            FormKind::CompanyRegistration => Self::Company(CompanyRegistration {
                nombre_empresa: fields.required("nombre_empresa")?,
                cuit: fields.optional("cuit_empresa"),
                direccion: fields.optional("direccion_sede"),
                email: fields.optional("email_empresa"),
                telefono: fields.optional("telefono_empresa"),
                sitio_web: fields.optional("sitio_web"),
                fondos_licitos: fields.consent(CONSENT_FIELD),
            }),
            FormKind::IndividualKyc => {
                Self::Individual(parse_individual(ApplicationChannel::Kyc, fields)?)
            }
            FormKind::TokenInterest => {
                Self::Individual(parse_individual(ApplicationChannel::SolicitudToken, fields)?)
            }
            FormKind::Contact => Self::Contact(ContactRequest {
                nombre_empresa: fields.required("nombre_empresa")?,
                email: fields.required("email")?,
                telefono: fields.optional("telefono"),
            }),
        };
        form.validate()?;
        Ok(form)
    }

    fn validate(&self) -> Result<(), FormError> {
        match self {
            Self::Company(company) => company.validate()?,
            Self::Individual(individual) => individual.validate()?,
            Self::Contact(contact) => contact.validate()?,
        }
        Ok(())
    }

    /// Confirmation email recipient, if the form carries an address.
    #[must_use]
    pub fn recipient(&self) -> Option<Recipient> {
        match self {
            Self::Company(company) => company.email.clone().map(|email| Recipient {
                email,
                display_name: company.nombre_empresa.clone(),
            }),
            Self::Individual(individual) => Some(Recipient {
                email: individual.email.clone(),
                display_name: format!("{} {}", individual.nombre, individual.apellido),
            }),
            Self::Contact(contact) => Some(Recipient {
                email: contact.email.clone(),
                display_name: contact.nombre_empresa.clone(),
            }),
        }
    }
}

fn parse_individual(
    origen: ApplicationChannel,
    fields: &FormFields,
) -> Result<IndividualApplication, FormError> {
    let fecha_nacimiento = fields
        .text("fecha_nacimiento")
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| FormError::InvalidDate("fecha_nacimiento"))
        })
        .transpose()?;

    Ok(IndividualApplication {
        origen,
        nombre: fields.required("nombre")?,
        apellido: fields.required("apellido")?,
        numero_documento: fields.first_of(&["numero_documento", "cuit_cuil"]),
        fecha_nacimiento,
        nacionalidad: fields.optional("nacionalidad"),
        direccion: fields.first_of(&["direccion", "domicilio"]),
        email: fields.required("email")?,
        telefono: fields.optional("telefono"),
        fuente_ingresos: fields.optional("fuente_ingresos"),
        capital_inversion: fields.optional("capital_inversion"),
        justificacion_servicios: fields.optional("justificacion_servicios"),
        dj_origen_fondos: fields.optional("dj_origen_fondos"),
        fondos_licitos: fields.consent(CONSENT_FIELD),
        pep_status: fields.optional("pep_status"),
    })
}
