//! The form types accepted by the service and what each one is bound to.

use serde::Serialize;

/// File fields of the company (KYB) registration form.
pub const COMPANY_FILE_GROUPS: [&str; 16] = [
    "estatuto_social",
    "acta_designacion_autoridades",
    "organigrama",
    "dni_representantes",
    "constancia_cuit",
    "constancia_domicilio",
    "estados_contables",
    "declaracion_beneficiarios_finales",
    "poder_representante",
    "constancia_inscripcion_iibb",
    "registro_accionistas",
    "manual_prevencion_lavado",
    "politica_kyc",
    "declaracion_pep",
    "comprobante_origen_fondos",
    "logo",
];

/// File fields of the individual KYC form.
pub const INDIVIDUAL_FILE_GROUPS: [&str; 3] = [
    "documento_identidad",
    "comprobante_domicilio_servicio",
    "comprobante_domicilio_alternativo",
];

/// File fields of the contact form.
pub const CONTACT_FILE_GROUPS: [&str; 1] = ["logo"];

/// Which form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Company KYB registration (`registro-empresa`).
    CompanyRegistration,
    /// Individual KYC onboarding (`kyc-persona-fisica`).
    IndividualKyc,
    /// Token purchase interest (`solicitud-token`), never carries files.
    TokenInterest,
    /// Contact request with a company logo (`contacto`).
    Contact,
}

/// Where a form's files go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLocation {
    /// Storage bucket.
    pub bucket: &'static str,
    /// Key prefix inside the bucket.
    pub prefix: &'static str,
}

/// Wording of the confirmation email for a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailCopy {
    /// Subject line.
    pub subject: &'static str,
    /// Headline.
    pub headline: &'static str,
    /// Body paragraph.
    pub body: &'static str,
    /// Call-to-action label.
    pub action_label: &'static str,
    /// Path on the public site the call-to-action points to.
    pub continuation_path: &'static str,
}

impl FormKind {
    /// All form kinds.
    pub const ALL: [Self; 4] = [
        Self::CompanyRegistration,
        Self::IndividualKyc,
        Self::TokenInterest,
        Self::Contact,
    ];

    /// Route segment under `/formularios`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::CompanyRegistration => "registro-empresa",
            Self::IndividualKyc => "kyc-persona-fisica",
            Self::TokenInterest => "solicitud-token",
            Self::Contact => "contacto",
        }
    }

    /// Table the persisted record lands in.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::CompanyRegistration => "registros_market",
            Self::IndividualKyc | Self::TokenInterest => "solicitudes_token",
            Self::Contact => "contactos",
        }
    }

    /// Bucket and key prefix for this form's files, `None` if it takes no files.
    #[must_use]
    pub const fn upload_location(self) -> Option<UploadLocation> {
        match self {
            Self::CompanyRegistration => Some(UploadLocation {
                bucket: "registros-empresas",
                prefix: "empresas",
            }),
            Self::IndividualKyc => Some(UploadLocation {
                bucket: "kyc-documentos-usuarios",
                prefix: "personas",
            }),
            Self::TokenInterest => None,
            Self::Contact => Some(UploadLocation {
                bucket: "registros-empresas",
                prefix: "contactos",
            }),
        }
    }

    /// File fields this form accepts.
    #[must_use]
    pub const fn file_groups(self) -> &'static [&'static str] {
        match self {
            Self::CompanyRegistration => &COMPANY_FILE_GROUPS,
            Self::IndividualKyc => &INDIVIDUAL_FILE_GROUPS,
            Self::TokenInterest => &[],
            Self::Contact => &CONTACT_FILE_GROUPS,
        }
    }

    /// Whether this form takes files at all.
    #[must_use]
    pub const fn accepts_files(self) -> bool {
        !self.file_groups().is_empty()
    }

    /// Every bucket any form uploads to, without duplicates.
    #[must_use]
    pub fn buckets() -> Vec<&'static str> {
        let mut buckets: Vec<&'static str> = Self::ALL
            .iter()
            .filter_map(|kind| kind.upload_location())
            .map(|location| location.bucket)
            .collect();
        buckets.sort_unstable();
        buckets.dedup();
        buckets
    }

    /// Message returned to the caller on success.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::CompanyRegistration => "Registro de empresa recibido correctamente",
            Self::IndividualKyc => "Solicitud KYC recibida correctamente",
            Self::TokenInterest => "Solicitud de token recibida correctamente",
            Self::Contact => "Mensaje de contacto recibido correctamente",
        }
    }

    /// Confirmation email wording.
    #[must_use]
    pub const fn email_copy(self) -> EmailCopy {
        match self {
            Self::CompanyRegistration => EmailCopy {
                subject: "Recibimos el registro de tu empresa",
                headline: "Registro de empresa recibido",
                body: "Nuestro equipo de cumplimiento revisará la documentación. El siguiente paso es completar la verificación de identidad de los representantes.",
                action_label: "Continuar con la verificación",
                continuation_path: "/formularios/kyc-persona-fisica",
            },
            Self::IndividualKyc => EmailCopy {
                subject: "Recibimos tu verificación de identidad",
                headline: "Verificación de identidad recibida",
                body: "Revisaremos tus datos y documentos. Mientras tanto puedes enviar tu solicitud de compra de tokens.",
                action_label: "Solicitar tokens",
                continuation_path: "/formularios/solicitud-token",
            },
            Self::TokenInterest => EmailCopy {
                subject: "Recibimos tu solicitud de tokens",
                headline: "Solicitud de tokens recibida",
                body: "Un asesor se pondrá en contacto contigo para continuar con la operación.",
                action_label: "Ver el mercado",
                continuation_path: "/market",
            },
            Self::Contact => EmailCopy {
                subject: "Gracias por contactarnos",
                headline: "Mensaje recibido",
                body: "Te responderemos a la brevedad.",
                action_label: "Ver el mercado",
                continuation_path: "/market",
            },
        }
    }
}
