//! Seller subscription plans.
//!
//! The plans are fixed; the backend has no endpoint for them.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{CurrencyCode, Price};

/// Billing cadence of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

impl BillingPeriod {
    /// Label shown under the plan title.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Mensual",
            Self::Yearly => "Anual",
        }
    }

    const fn per(&self) -> &'static str {
        match self {
            Self::Monthly => "por mes",
            Self::Yearly => "por año",
        }
    }
}

/// A subscription plan offered to sellers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionPlan {
    pub id: &'static str,
    pub title: &'static str,
    pub period: BillingPeriod,
    pub price: Price,
    pub features: &'static [&'static str],
    pub is_popular: bool,
}

impl SubscriptionPlan {
    /// e.g. `$5.00 por mes`.
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("{} {}", self.price.display(), self.period.per())
    }

    /// Features as a bulleted block.
    #[must_use]
    pub fn description(&self) -> String {
        self.features
            .iter()
            .map(|feature| format!("• {feature}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const MONTHLY_FEATURES: &[&str] = &[
    "Productos ilimitados",
    "Análisis de ventas avanzado",
    "Soporte prioritario 24/7",
    "Herramientas de marketing",
    "Sin comisiones adicionales",
];

const YEARLY_FEATURES: &[&str] = &[
    "Todo lo del plan mensual",
    "2 meses gratis (ahorra $10)",
    "Consultoría personalizada",
    "Acceso anticipado a nuevas funciones",
    "Reportes personalizados",
];

/// The plans in display order.
#[must_use]
pub fn catalogue() -> Vec<SubscriptionPlan> {
    vec![
        SubscriptionPlan {
            id: "monthly",
            title: "Premium",
            period: BillingPeriod::Monthly,
            price: Price::new(Decimal::new(500, 2), CurrencyCode::USD),
            features: MONTHLY_FEATURES,
            is_popular: true,
        },
        SubscriptionPlan {
            id: "yearly",
            title: "Premium Plus",
            period: BillingPeriod::Yearly,
            price: Price::new(Decimal::new(5000, 2), CurrencyCode::USD),
            features: YEARLY_FEATURES,
            is_popular: false,
        },
    ]
}
