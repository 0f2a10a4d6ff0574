//! Primitives - Built-in components.
//!
//! This module provides the components registered before any call is
//! processed:
//! - [`Container`] - View, ScrollView and ListView/FlatList
//! - [`Text`], [`Image`] - leaves with thin attribute appliers
//! - [`Button`], [`Switch`], [`CheckBox`] - interactive controls
//! - [`GestureDetector`] - touch gesture container
//! - [`Modal`], [`AnimatedView`]
//! - [`TextInput`], [`Touchable`] - text entry and pressable containers
//! - [`ActivityIndicator`], [`SafeAreaView`]
//!
//! # Architecture
//!
//! Every updater first runs the property mapper, then its own leaf
//! appliers. Every event binder installs one native handler per event name
//! that shapes the native params and forwards `(id, name, params)` to the
//! outbound callback. Names a component does not recognise are forwarded
//! with the native params unchanged.
//!
//! Each component is registered under its plain name and the `DC`-prefixed
//! aliases. Hosts override any of them by registering the same tag again.

pub mod binding;
mod controls;
mod gesture;
mod input;
mod modal;
mod status;
mod text;
mod view;

use std::rc::Rc;

use crate::engine::{Component, ComponentRegistry};

pub use controls::{Button, CheckBox, Switch};
pub use gesture::GestureDetector;
pub use input::{TextInput, Touchable};
pub use modal::{AnimatedView, Modal};
pub use status::{ActivityIndicator, SafeAreaView};
pub use text::{Image, Text};
pub use view::{Container, ContainerKind};

/// Register every built-in component under its names.
pub fn register_builtins(registry: &mut ComponentRegistry) {
    let builtins: [(&[&str], Rc<dyn Component>); 15] = [
        (&["View", "DCView"], Rc::new(Container::new(ContainerKind::Plain))),
        (&["ScrollView", "DCScrollView"], Rc::new(Container::new(ContainerKind::Scroll))),
        (
            &["ListView", "FlatList", "DCListView", "DCFlatList"],
            Rc::new(Container::new(ContainerKind::List)),
        ),
        (&["Text", "DCText"], Rc::new(Text)),
        (&["Image", "DCImage"], Rc::new(Image)),
        (&["Button", "DCButton"], Rc::new(Button)),
        (&["Switch", "DCSwitch"], Rc::new(Switch)),
        (&["CheckBox", "Checkbox", "DCCheckbox"], Rc::new(CheckBox)),
        (&["GestureDetector", "DCGestureDetector"], Rc::new(GestureDetector)),
        (&["Modal", "DCModal"], Rc::new(Modal)),
        (
            &["AnimatedView", "Animated.View", "DCAnimatedView"],
            Rc::new(AnimatedView),
        ),
        (&["TextInput", "DCTextInput"], Rc::new(TextInput)),
        (
            &["TouchableOpacity", "TouchableHighlight", "DCTouchableOpacity", "DCTouchableHighlight", "DCTouchable"],
            Rc::new(Touchable),
        ),
        (&["ActivityIndicator", "DCActivityIndicator"], Rc::new(ActivityIndicator)),
        (&["SafeAreaView", "DCSafeAreaView"], Rc::new(SafeAreaView)),
    ];

    for (names, component) in builtins {
        for name in names {
            registry.register(*name, Rc::clone(&component));
        }
    }
}
