//! Rule evaluation scope and checkout context.

use std::fmt;

use turbo_cart::Cart;

/// Read-only view of the checkout / sales channel a cart is evaluated in.
///
/// Rules receive it uniformly even when they do not read from it, so that
/// heterogeneous rules can be combined. Test doubles implement this trait
/// directly.
pub trait CheckoutContext: Send + Sync {
    /// Sales channel the checkout runs in.
    fn sales_channel_id(&self) -> &str;

    /// ISO currency code of the checkout.
    fn currency(&self) -> &str;

    /// Logged-in customer, if any.
    fn customer_id(&self) -> Option<&str>;
}

/// A concrete checkout context for a sales channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesChannelContext {
    /// Sales channel identifier.
    pub sales_channel_id: String,
    /// ISO currency code.
    pub currency: String,
    /// Logged-in customer.
    pub customer_id: Option<String>,
}

impl SalesChannelContext {
    /// Create a context for an anonymous checkout.
    pub fn new(sales_channel_id: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            sales_channel_id: sales_channel_id.into(),
            currency: currency.into(),
            customer_id: None,
        }
    }

    /// Set the logged-in customer.
    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }
}

impl CheckoutContext for SalesChannelContext {
    fn sales_channel_id(&self) -> &str {
        &self.sales_channel_id
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }
}

/// A cart together with the checkout context it is evaluated in.
#[derive(Clone, Copy)]
pub struct CartRuleScope<'a> {
    cart: &'a Cart,
    context: &'a dyn CheckoutContext,
}

impl<'a> CartRuleScope<'a> {
    /// Create a new scope.
    pub fn new(cart: &'a Cart, context: &'a dyn CheckoutContext) -> Self {
        Self { cart, context }
    }

    /// The cart under evaluation.
    pub fn cart(&self) -> &'a Cart {
        self.cart
    }

    /// The checkout context.
    pub fn context(&self) -> &'a dyn CheckoutContext {
        self.context
    }
}

impl fmt::Debug for CartRuleScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartRuleScope")
            .field("cart", &self.cart.token)
            .field("line_items", &self.cart.line_items().len())
            .field("sales_channel_id", &self.context.sales_channel_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_channel_context() {
        let anonymous = SalesChannelContext::new("storefront", "EUR");
        assert_eq!(anonymous.customer_id(), None);

        let context = anonymous.with_customer("customer-1");

        assert_eq!(context.sales_channel_id(), "storefront");
        assert_eq!(context.currency(), "EUR");
        assert_eq!(context.customer_id(), Some("customer-1"));
    }

    #[test]
    fn test_scope_exposes_cart_and_context() {
        let cart = Cart::new("test", "token-1");
        let context = SalesChannelContext::new("storefront", "EUR");
        let scope = CartRuleScope::new(&cart, &context);

        assert_eq!(scope.cart().token, "token-1");
        assert_eq!(scope.context().currency(), "EUR");
        assert!(format!("{:?}", scope).contains("token-1"));
    }
}
