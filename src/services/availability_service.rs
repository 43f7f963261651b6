//! Verificación de disponibilidad de vehículos
//!
//! Un rango solicitado `[start, end]` choca con una ventana existente cuando
//! ambos intervalos cerrados comparten al menos un instante. Un extremo que
//! cae dentro de la ventana (bordes incluidos) es conflicto, y también lo es
//! un rango que contiene la ventana completa.

use chrono::{DateTime, Utc};

use crate::models::VehicleUnavailability;

/// `true` si `[start, end]` se solapa con la ventana
pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    window: &VehicleUnavailability,
) -> bool {
    start <= window.unavailable_to && end >= window.unavailable_from
}

/// `true` si `[start, end]` choca con alguna de las ventanas.
/// El resultado no depende del orden de `windows`.
pub fn is_unavailable(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    windows: &[VehicleUnavailability],
) -> bool {
    windows.iter().any(|window| overlaps(start, end, window))
}
