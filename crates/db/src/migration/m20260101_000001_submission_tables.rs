//! Submission tables.
//!
//! One table per form family. File groups are stored as `TEXT[]` columns of
//! public URLs named `<group>_urls`; a group with no files stays NULL.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SUBMISSION_TABLES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS contactos; DROP TABLE IF EXISTS solicitudes_token; DROP TABLE IF EXISTS registros_market;",
        )
        .await?;
        Ok(())
    }
}

const SUBMISSION_TABLES_SQL: &str = r"
-- Company (KYB) registrations
CREATE TABLE registros_market (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    nombre_empresa TEXT NOT NULL,
    cuit TEXT,
    direccion TEXT,
    email TEXT,
    telefono TEXT,
    sitio_web TEXT,
    fondos_licitos BOOLEAN NOT NULL DEFAULT FALSE,
    estatuto_social_urls TEXT[],
    acta_designacion_autoridades_urls TEXT[],
    organigrama_urls TEXT[],
    dni_representantes_urls TEXT[],
    constancia_cuit_urls TEXT[],
    constancia_domicilio_urls TEXT[],
    estados_contables_urls TEXT[],
    declaracion_beneficiarios_finales_urls TEXT[],
    poder_representante_urls TEXT[],
    constancia_inscripcion_iibb_urls TEXT[],
    registro_accionistas_urls TEXT[],
    manual_prevencion_lavado_urls TEXT[],
    politica_kyc_urls TEXT[],
    declaracion_pep_urls TEXT[],
    comprobante_origen_fondos_urls TEXT[],
    logo_urls TEXT[],
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_registros_market_created ON registros_market(created_at DESC);

-- Individual KYC and token requests
CREATE TABLE solicitudes_token (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    origen TEXT NOT NULL CHECK (origen IN ('kyc', 'solicitud_token')),
    nombre TEXT NOT NULL,
    apellido TEXT NOT NULL,
    numero_documento TEXT,
    fecha_nacimiento DATE,
    nacionalidad TEXT,
    direccion TEXT,
    email TEXT NOT NULL,
    telefono TEXT,
    fuente_ingresos TEXT,
    capital_inversion TEXT,
    justificacion_servicios TEXT,
    dj_origen_fondos TEXT,
    fondos_licitos BOOLEAN NOT NULL DEFAULT FALSE,
    pep_status TEXT,
    documento_identidad_urls TEXT[],
    comprobante_domicilio_servicio_urls TEXT[],
    comprobante_domicilio_alternativo_urls TEXT[],
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_solicitudes_token_created ON solicitudes_token(created_at DESC);
CREATE INDEX idx_solicitudes_token_email ON solicitudes_token(email);

-- Contact requests
CREATE TABLE contactos (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    nombre_empresa TEXT NOT NULL,
    email TEXT NOT NULL,
    telefono TEXT,
    logo_urls TEXT[],
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_contactos_created ON contactos(created_at DESC);
";
