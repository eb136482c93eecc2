//! `SeaORM` entity definitions, one per submission table.

pub mod contactos;
pub mod registros_market;
pub mod solicitudes_token;
