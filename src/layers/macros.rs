//! Boilerplate shared by the concrete layer types.

/// Implements the accessor half of `LayerTrait` for a type that keeps its
/// `LayerProperties` in the named field.
///
/// Usage:
/// ```ignore
/// impl LayerTrait for MarkerLayer {
///     crate::impl_layer_trait!(properties);
///     fn feature_count(&self) -> usize { self.markers.len() }
/// }
/// ```
#[macro_export]
macro_rules! impl_layer_trait {
    ($properties_field:ident) => {
        fn properties(&self) -> &$crate::layers::base::LayerProperties {
            &self.$properties_field
        }

        fn properties_mut(&mut self) -> &mut $crate::layers::base::LayerProperties {
            &mut self.$properties_field
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}
