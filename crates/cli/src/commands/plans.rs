//! Subscription plans.

use shopfront_core::plans;

#[allow(clippy::print_stdout)]
pub fn show() {
    for plan in plans::catalogue() {
        let badge = if plan.is_popular { "  [Popular]" } else { "" };
        println!("{} ({}){badge}", plan.title, plan.period.label());
        println!("  {}", plan.price_label());
        println!("{}", plan.description());
        println!();
    }
}
