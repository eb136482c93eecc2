//! Submission repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use registra_core::forms::{
    CompanyRegistration, ContactRequest, Form, FormKind, IndividualApplication,
};
use registra_core::submission::{Record, SavedRecord, StoreError, SubmissionStore};
use registra_core::upload::GroupUrls;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{contactos, registros_market, solicitudes_token};

/// Persists submissions, one row per record, in the table of its form kind.
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    db: DatabaseConnection,
}

impl SubmissionRepository {
    /// Creates a new submission repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert_company(
        &self,
        company: &CompanyRegistration,
        urls: &GroupUrls,
    ) -> Result<SavedRecord, DbErr> {
        let model = company_model(company, urls, Uuid::new_v4(), Utc::now().into())
            .insert(&self.db)
            .await?;
        Ok(saved(model.id, model.created_at))
    }

    async fn insert_individual(
        &self,
        application: &IndividualApplication,
        urls: &GroupUrls,
    ) -> Result<SavedRecord, DbErr> {
        let model = individual_model(application, urls, Uuid::new_v4(), Utc::now().into())
            .insert(&self.db)
            .await?;
        Ok(saved(model.id, model.created_at))
    }

    async fn insert_contact(
        &self,
        contact: &ContactRequest,
        urls: &GroupUrls,
    ) -> Result<SavedRecord, DbErr> {
        let model = contact_model(contact, urls, Uuid::new_v4(), Utc::now().into())
            .insert(&self.db)
            .await?;
        Ok(saved(model.id, model.created_at))
    }
}

#[async_trait]
impl SubmissionStore for SubmissionRepository {
    async fn insert(&self, record: &Record) -> Result<SavedRecord, StoreError> {
        let table = record.kind.table();
        if !fits_table(record) {
            return Err(StoreError::Mismatch { table });
        }

        let result = match &record.form {
            Form::Company(company) => self.insert_company(company, &record.urls).await,
            Form::Individual(application) => {
                self.insert_individual(application, &record.urls).await
            }
            Form::Contact(contact) => self.insert_contact(contact, &record.urls).await,
        };

        let saved = result.map_err(|e| StoreError::Insert {
            table,
            message: e.to_string(),
        })?;
        debug!(table, id = %saved.id, "row inserted");
        Ok(saved)
    }
}

/// The form shape matches the kind and every URL group has a column.
fn fits_table(record: &Record) -> bool {
    let shape_matches = matches!(
        (record.kind, &record.form),
        (FormKind::CompanyRegistration, Form::Company(_))
            | (FormKind::IndividualKyc | FormKind::TokenInterest, Form::Individual(_))
            | (FormKind::Contact, Form::Contact(_))
    );
    shape_matches
        && record
            .urls
            .groups()
            .all(|group| record.kind.file_groups().contains(&group))
}

fn saved(id: Uuid, created_at: DateTimeWithTimeZone) -> SavedRecord {
    SavedRecord {
        id,
        created_at: created_at.with_timezone(&Utc),
    }
}

pub(crate) fn company_model(
    company: &CompanyRegistration,
    urls: &GroupUrls,
    id: Uuid,
    now: DateTimeWithTimeZone,
) -> registros_market::ActiveModel {
    registros_market::ActiveModel {
        id: Set(id),
        nombre_empresa: Set(company.nombre_empresa.clone()),
        cuit: Set(company.cuit.clone()),
        direccion: Set(company.direccion.clone()),
        email: Set(company.email.clone()),
        telefono: Set(company.telefono.clone()),
        sitio_web: Set(company.sitio_web.clone()),
        fondos_licitos: Set(company.fondos_licitos),
        estatuto_social_urls: Set(urls.column("estatuto_social")),
        acta_designacion_autoridades_urls: Set(urls.column("acta_designacion_autoridades")),
        organigrama_urls: Set(urls.column("organigrama")),
        dni_representantes_urls: Set(urls.column("dni_representantes")),
        constancia_cuit_urls: Set(urls.column("constancia_cuit")),
        constancia_domicilio_urls: Set(urls.column("constancia_domicilio")),
        estados_contables_urls: Set(urls.column("estados_contables")),
        declaracion_beneficiarios_finales_urls: Set(
            urls.column("declaracion_beneficiarios_finales"),
        ),
        poder_representante_urls: Set(urls.column("poder_representante")),
        constancia_inscripcion_iibb_urls: Set(urls.column("constancia_inscripcion_iibb")),
        registro_accionistas_urls: Set(urls.column("registro_accionistas")),
        manual_prevencion_lavado_urls: Set(urls.column("manual_prevencion_lavado")),
        politica_kyc_urls: Set(urls.column("politica_kyc")),
        declaracion_pep_urls: Set(urls.column("declaracion_pep")),
        comprobante_origen_fondos_urls: Set(urls.column("comprobante_origen_fondos")),
        logo_urls: Set(urls.column("logo")),
        created_at: Set(now),
    }
}

pub(crate) fn individual_model(
    application: &IndividualApplication,
    urls: &GroupUrls,
    id: Uuid,
    now: DateTimeWithTimeZone,
) -> solicitudes_token::ActiveModel {
    solicitudes_token::ActiveModel {
        id: Set(id),
        origen: Set(application.origen.as_str().to_string()),
        nombre: Set(application.nombre.clone()),
        apellido: Set(application.apellido.clone()),
        numero_documento: Set(application.numero_documento.clone()),
        fecha_nacimiento: Set(application.fecha_nacimiento),
        nacionalidad: Set(application.nacionalidad.clone()),
        direccion: Set(application.direccion.clone()),
        email: Set(application.email.clone()),
        telefono: Set(application.telefono.clone()),
        fuente_ingresos: Set(application.fuente_ingresos.clone()),
        capital_inversion: Set(application.capital_inversion.clone()),
        justificacion_servicios: Set(application.justificacion_servicios.clone()),
        dj_origen_fondos: Set(application.dj_origen_fondos.clone()),
        fondos_licitos: Set(application.fondos_licitos),
        pep_status: Set(application.pep_status.clone()),
        documento_identidad_urls: Set(urls.column("documento_identidad")),
        comprobante_domicilio_servicio_urls: Set(urls.column("comprobante_domicilio_servicio")),
        comprobante_domicilio_alternativo_urls: Set(
            urls.column("comprobante_domicilio_alternativo"),
        ),
        created_at: Set(now),
    }
}

pub(crate) fn contact_model(
    contact: &ContactRequest,
    urls: &GroupUrls,
    id: Uuid,
    now: DateTimeWithTimeZone,
) -> contactos::ActiveModel {
    contactos::ActiveModel {
        id: Set(id),
        nombre_empresa: Set(contact.nombre_empresa.clone()),
        email: Set(contact.email.clone()),
        telefono: Set(contact.telefono.clone()),
        logo_urls: Set(urls.column("logo")),
        created_at: Set(now),
    }
}

#[cfg(test)]
#[path = "submission_tests.rs"]
mod tests;
