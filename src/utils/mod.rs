//! Helper macros shared by the crate's data structures and configuration.
//!
//! - [`getter_fn`] generates borrowing accessors for private fields.
//! - [`with_field_fn`] generates builder-style `with_*` setters.

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        #[cfg_attr(coverage_nightly, coverage(off))]
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            #[cfg_attr(coverage_nightly, coverage(off))]
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}
