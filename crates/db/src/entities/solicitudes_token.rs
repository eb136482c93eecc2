//! `SeaORM` Entity for solicitudes_token table.
//!
//! Shared by the KYC form and the token request form; `origen` tells them apart.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "solicitudes_token")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub origen: String,
    pub nombre: String,
    pub apellido: String,
    pub numero_documento: Option<String>,
    pub fecha_nacimiento: Option<Date>,
    pub nacionalidad: Option<String>,
    pub direccion: Option<String>,
    pub email: String,
    pub telefono: Option<String>,
    pub fuente_ingresos: Option<String>,
    pub capital_inversion: Option<String>,
    pub justificacion_servicios: Option<String>,
    pub dj_origen_fondos: Option<String>,
    pub fondos_licitos: bool,
    pub pep_status: Option<String>,
    pub documento_identidad_urls: Option<Vec<String>>,
    pub comprobante_domicilio_servicio_urls: Option<Vec<String>>,
    pub comprobante_domicilio_alternativo_urls: Option<Vec<String>>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
