// SPDX-License-Identifier: MIT OR Apache-2.0
//! Invisible data carriers.

use super::BuiltinObject;
use crate::context::RenderContext;
use crate::object::SceneObject;
use crate::registry::Registry;
use crate::serialize::SerializeError;
use motion_animation::{Animatable, AnimatableProperty, ObjectProperty, SerializableAnimatable, Vec2};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Payload of both data objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPayload<T> {
    data: SerializableAnimatable<T>,
}

macro_rules! data_object {
    ($(#[$meta:meta])* $name:ident, $value:ty, $ctor:ident, $zero:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            /// Baked values
            pub data: Animatable<$value>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    data: Animatable::$ctor("data", $zero),
                }
            }
        }

        impl SceneObject for $name {
            fn properties(&mut self) -> Vec<Box<dyn ObjectProperty + '_>> {
                vec![Box::new(AnimatableProperty::new(&mut self.data))]
            }

            fn render(&self, _ctx: &mut RenderContext<'_>) {}

            fn clone_object(&self) -> Box<dyn SceneObject> {
                Box::new(self.clone())
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        impl BuiltinObject for $name {
            type Data = DataPayload<$value>;

            fn to_data(&self, _registry: &Registry) -> Result<Self::Data, SerializeError> {
                Ok(DataPayload {
                    data: self.data.serializable(),
                })
            }

            fn load_data(&mut self, data: Self::Data, _registry: &Registry) -> Result<(), SerializeError> {
                self.data.load_serializable(data.data);
                Ok(())
            }
        }
    };
}

data_object!(
    /// One-dimensional data for baking values into keyframes
    Data1D,
    f64,
    scalar,
    0.0
);

data_object!(
    /// Two-dimensional data for baking values into keyframes
    Data2D,
    Vec2,
    vec2,
    Vec2::ZERO
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use motion_animation::PropertyValue;

    #[test]
    fn test_render_draws_nothing() {
        let mut canvas = RecordingCanvas::new();
        let mut data = Data2D::default();
        data.data.insert(0.0, Vec2::new(1.0, 2.0), None);
        data.render(&mut RenderContext::new(&mut canvas, 0.0, Vec2::new(10.0, 10.0)));
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_single_data_property() {
        let mut data = Data1D::default();
        let mut props = data.properties();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].translation_key(), "data");
        props[0].set(0.0, PropertyValue::Scalar(4.0)).unwrap();
        drop(props);
        assert_eq!(data.data.get(0.0), 4.0);
        assert!(data.capabilities().is_empty());
    }

    #[test]
    fn test_payload_shape() {
        let registry = Registry::new();
        let mut data = Data1D::default();
        data.data.insert(10.0, 3.0, None);
        let json = serde_json::to_value(data.to_data(&registry).unwrap()).unwrap();
        assert_eq!(json["data"]["defaultValue"], 0.0);
        assert_eq!(json["data"]["keyframes"][0]["time"], 10.0);
    }
}
