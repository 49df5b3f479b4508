use crate::shared::types::LatLng;

/// Reports shown per dashboard page (pagination is client-side)
pub const ITEMS_PER_PAGE: usize = 10;

/// Fallback location when geolocation is unavailable or denied (Mexico City)
pub const DEFAULT_USER_LOCATION: LatLng = LatLng::new(19.4326, -99.1332);

/// Initial center of the admin map (Aguascalientes)
pub const ADMIN_MAP_CENTER: LatLng = LatLng::new(21.8853, -102.2916);

/// Filename for the CSV attachment served by the export endpoint
pub const EXPORT_FILENAME: &str = "reportes.csv";

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

pub const MSG_SELECT_LOCATION: &str = "Por favor seleccione una ubicación en el mapa.";

pub const MSG_SUBMIT_SUCCESS: &str =
    "Reporte enviado con éxito. ¡Gracias por contribuir a la conservación del agua!";

pub const MSG_SUBMIT_FAILED: &str = "Hubo un problema al enviar el reporte.";

pub const MSG_CONNECTION_ERROR: &str = "Error de conexión con el servidor.";
