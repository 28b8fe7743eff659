//! User-facing error messages, one table per operation.
//!
//! A table maps known HTTP status codes to a fixed message and decides what
//! to show for unknown codes, business failures and transport failures.

use shopfront_client::ApiError;

/// Message used for a status code the table does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Same text for every unlisted code.
    Fixed(&'static str),
    /// `"<text>: <code>"`
    WithCode(&'static str),
    /// `"<text> (<code>)"`
    InParens(&'static str),
}

/// Status-to-message table for one operation.
#[derive(Debug, Clone, Copy)]
pub struct MessageTable {
    pub statuses: &'static [(u16, &'static str)],
    pub fallback: Fallback,
    /// Shown when the envelope reports failure without a message.
    pub business: &'static str,
    /// Prefix for transport failures, followed by the cause.
    pub transport: &'static str,
}

impl MessageTable {
    /// Message for an HTTP status.
    #[must_use]
    pub fn for_status(&self, status: u16) -> String {
        self.statuses
            .iter()
            .find(|(code, _)| *code == status)
            .map_or_else(
                || match self.fallback {
                    Fallback::Fixed(text) => text.to_string(),
                    Fallback::WithCode(text) => format!("{text}: {status}"),
                    Fallback::InParens(text) => format!("{text} ({status})"),
                },
                |(_, text)| (*text).to_string(),
            )
    }

    /// Message for any failed call.
    #[must_use]
    pub fn describe(&self, error: &ApiError) -> String {
        match error {
            ApiError::Http { status } => self.for_status(*status),
            ApiError::Business { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .unwrap_or(self.business)
                .to_string(),
            other => format!("{}: {other}", self.transport),
        }
    }
}

const CONNECTION: &str = "Error de conexión";
const GENERIC: &str = "Error";

pub const LOAD_PRODUCTS: MessageTable = MessageTable {
    statuses: &[(404, "No se encontraron productos"), (500, "Error del servidor")],
    fallback: Fallback::WithCode("Error al cargar productos"),
    business: "Error desconocido",
    transport: CONNECTION,
};

/// 404 is handled by [`search_failed`], which names the query.
pub const SEARCH_PRODUCTS: MessageTable = MessageTable {
    statuses: &[(500, "Error del servidor")],
    fallback: Fallback::InParens(CONNECTION),
    business: "Error en la búsqueda",
    transport: CONNECTION,
};

pub const LOAD_PRODUCT: MessageTable = MessageTable {
    statuses: &[
        (404, "Producto no encontrado"),
        (403, "No tienes permisos para ver este producto"),
        (500, "Error del servidor"),
    ],
    fallback: Fallback::WithCode("Error al cargar producto"),
    business: "Producto no encontrado",
    transport: CONNECTION,
};

pub const DETAIL_ADD_TO_CART: MessageTable = MessageTable {
    statuses: &[
        (400, "Datos inválidos"),
        (404, "Producto no encontrado"),
        (409, "Stock insuficiente"),
        (401, "Debes iniciar sesión para agregar productos al carrito"),
    ],
    fallback: Fallback::Fixed("Error al agregar al carrito"),
    business: "Error al agregar al carrito",
    transport: CONNECTION,
};

pub const CART_ADD: MessageTable = MessageTable {
    business: "Error al agregar producto",
    transport: GENERIC,
    ..DETAIL_ADD_TO_CART
};

pub const CART_ACTION: MessageTable = MessageTable {
    statuses: &[
        (400, "Datos inválidos"),
        (401, "Sesión expirada"),
        (404, "Elemento no encontrado"),
        (409, "Conflicto en la operación"),
    ],
    fallback: Fallback::WithCode("Error en la operación"),
    business: "Error en la operación",
    transport: CONNECTION,
};

pub const LOAD_CART: MessageTable = MessageTable {
    statuses: &[
        (401, "Sesión expirada, inicia sesión nuevamente"),
        (403, "No tienes permisos para acceder al carrito"),
        (404, "Carrito no encontrado"),
        (500, "Error del servidor"),
    ],
    fallback: Fallback::WithCode("Error al cargar carrito"),
    business: "Error desconocido",
    transport: CONNECTION,
};

pub const AUTH: MessageTable = MessageTable {
    statuses: &[],
    fallback: Fallback::Fixed("Upss, Verifica bien si sus datos son correctos :)"),
    business: "Error desconocido",
    transport: GENERIC,
};

pub const LOAD_MY_PRODUCTS: MessageTable = MessageTable {
    statuses: &[
        (401, "No tienes permisos para ver tus productos"),
        (403, "Necesitas una membresía Premium para gestionar productos"),
    ],
    fallback: Fallback::WithCode("Error al cargar productos"),
    business: "Error desconocido",
    transport: GENERIC,
};

pub const REFRESH_MY_PRODUCTS: MessageTable = MessageTable {
    statuses: &[],
    fallback: Fallback::Fixed("Error al actualizar productos"),
    business: "Error desconocido",
    transport: GENERIC,
};

pub const DELETE_PRODUCT: MessageTable = MessageTable {
    statuses: &[
        (401, "No tienes permisos para eliminar este producto"),
        (403, "No puedes eliminar este producto"),
        (404, "Producto no encontrado"),
    ],
    fallback: Fallback::WithCode("Error al eliminar producto"),
    business: "Error al eliminar producto",
    transport: GENERIC,
};

pub const UPDATE_PRODUCT: MessageTable = MessageTable {
    statuses: &[
        (401, "No tienes permisos para editar este producto"),
        (403, "No puedes editar este producto"),
        (404, "Producto no encontrado"),
        (400, "Datos del producto inválidos"),
    ],
    fallback: Fallback::WithCode("Error al actualizar producto"),
    business: "Error al actualizar producto",
    transport: GENERIC,
};

pub const CREATE_PRODUCT: MessageTable = MessageTable {
    statuses: &[
        (401, "No tienes permisos para agregar productos"),
        (403, "Necesitas una membresía Premium para agregar productos"),
        (400, "Datos del producto inválidos"),
        (500, "Error del servidor, intenta más tarde"),
    ],
    fallback: Fallback::WithCode("Error al crear producto"),
    business: "Error desconocido",
    transport: GENERIC,
};

pub const PRODUCT_ADDED_TO_CART: &str = "Producto agregado al carrito exitosamente";
pub const CART_ITEM_ADDED: &str = "Producto agregado al carrito";
pub const CART_ACTION_DONE: &str = "Operación realizada exitosamente";
pub const PRODUCT_DELETED: &str = "Producto eliminado exitosamente";
pub const PRODUCT_UPDATED: &str = "Producto actualizado exitosamente";
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";

/// Message for a failed search; a 404 names the query.
#[must_use]
pub fn search_failed(error: &ApiError, query: &str) -> String {
    match error.status() {
        Some(404) => format!("No se encontraron productos para \"{query}\""),
        _ => SEARCH_PRODUCTS.describe(error),
    }
}
