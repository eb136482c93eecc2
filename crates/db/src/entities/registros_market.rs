//! `SeaORM` Entity for registros_market table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "registros_market")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nombre_empresa: String,
    pub cuit: Option<String>,
    pub direccion: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub sitio_web: Option<String>,
    pub fondos_licitos: bool,
    pub estatuto_social_urls: Option<Vec<String>>,
    pub acta_designacion_autoridades_urls: Option<Vec<String>>,
    pub organigrama_urls: Option<Vec<String>>,
    pub dni_representantes_urls: Option<Vec<String>>,
    pub constancia_cuit_urls: Option<Vec<String>>,
    pub constancia_domicilio_urls: Option<Vec<String>>,
    pub estados_contables_urls: Option<Vec<String>>,
    pub declaracion_beneficiarios_finales_urls: Option<Vec<String>>,
    pub poder_representante_urls: Option<Vec<String>>,
    pub constancia_inscripcion_iibb_urls: Option<Vec<String>>,
    pub registro_accionistas_urls: Option<Vec<String>>,
    pub manual_prevencion_lavado_urls: Option<Vec<String>>,
    pub politica_kyc_urls: Option<Vec<String>>,
    pub declaracion_pep_urls: Option<Vec<String>>,
    pub comprobante_origen_fondos_urls: Option<Vec<String>>,
    pub logo_urls: Option<Vec<String>>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
