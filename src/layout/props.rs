//! Property Mapper - Style dictionary to native layout/appearance attributes.
//!
//! Translates an untyped property bag into the taffy `Style` and the
//! [`Appearance`](crate::native::Appearance) held by a native view.
//!
//! Application is incremental: a key that is absent leaves the previously
//! applied value untouched. A malformed entry (wrong type, unparseable color,
//! missing `value`) is skipped on its own and never aborts the rest of the bag.

use serde_json::{Map, Value};
use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf,
    Dimension as TaffyDimension, Display as TaffyDisplay, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, JustifyContent as TaffyJustifyContent, LengthPercentage,
    LengthPercentageAuto, Overflow as TaffyOverflow, Point, Position as TaffyPosition, Rect,
    Style,
};
use tracing::debug;

use crate::native::NativeView;
use crate::types::{
    Align, Dimension, Display, FlexDirection, FlexWrap, JustifyContent, Overflow, Position, Props,
    Rgba,
};

// =============================================================================
// VALUE PARSING
// =============================================================================

/// Read a number from a JSON value.
fn number(value: &Value) -> Option<f32> {
    value.as_f64().map(|n| n as f32)
}

/// Parse a dimensional value.
///
/// Accepts `{value, unit}` (unit ∈ point|percent|auto, unknown or missing unit
/// means point), a bare number (points), `"auto"` or `"50%"`.
pub fn parse_dimension(value: &Value) -> Option<Dimension> {
    match value {
        Value::Number(_) => number(value).map(Dimension::Point),
        Value::String(s) => {
            let s = s.trim();
            if s == "auto" {
                Some(Dimension::Auto)
            } else if let Some(pct) = s.strip_suffix('%') {
                pct.trim().parse::<f32>().ok().map(Dimension::Percent)
            } else {
                s.parse::<f32>().ok().map(Dimension::Point)
            }
        }
        Value::Object(map) => {
            let unit = map.get("unit").and_then(Value::as_str).unwrap_or("point");
            if unit == "auto" {
                return Some(Dimension::Auto);
            }
            let amount = map.get("value").and_then(number)?;
            Some(match unit {
                "percent" => Dimension::Percent(amount),
                _ => Dimension::Point(amount),
            })
        }
        _ => None,
    }
}

/// Whether an object is a single `{value, unit}` pair rather than an edge map.
fn is_dimension_object(map: &Map<String, Value>) -> bool {
    map.contains_key("value") || map.contains_key("unit")
}

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> Option<TaffyDimension> {
    Some(match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Point(n) => TaffyDimension::Length(n),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    })
}

fn to_taffy_lpa(dim: Dimension) -> Option<LengthPercentageAuto> {
    Some(match dim {
        Dimension::Auto => LengthPercentageAuto::Auto,
        Dimension::Point(n) => LengthPercentageAuto::Length(n),
        Dimension::Percent(p) => LengthPercentageAuto::Percent(p / 100.0),
    })
}

/// Padding has no `auto`; an auto padding entry is malformed.
fn to_taffy_lp(dim: Dimension) -> Option<LengthPercentage> {
    match dim {
        Dimension::Auto => None,
        Dimension::Point(n) => Some(LengthPercentage::Length(n)),
        Dimension::Percent(p) => Some(LengthPercentage::Percent(p / 100.0)),
    }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> Option<TaffyJustifyContent> {
    Some(match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    })
}

/// `alignItems`: unrecognised values fall back to stretch.
fn to_taffy_align_items(align: Align) -> Option<TaffyAlignItems> {
    Some(match align {
        Align::FlexStart => TaffyAlignItems::FlexStart,
        Align::Center => TaffyAlignItems::Center,
        Align::FlexEnd => TaffyAlignItems::FlexEnd,
        Align::Baseline => TaffyAlignItems::Baseline,
        _ => TaffyAlignItems::Stretch,
    })
}

/// `alignSelf`: `auto` (and anything unrecognised) inherits from the parent.
fn to_taffy_align_self(align: Align) -> Option<TaffyAlignSelf> {
    match align {
        Align::FlexStart => Some(TaffyAlignSelf::FlexStart),
        Align::Center => Some(TaffyAlignSelf::Center),
        Align::FlexEnd => Some(TaffyAlignSelf::FlexEnd),
        Align::Baseline => Some(TaffyAlignSelf::Baseline),
        Align::Stretch => Some(TaffyAlignSelf::Stretch),
        _ => None,
    }
}

/// `alignContent`: unrecognised values fall back to flex-start.
fn to_taffy_align_content(align: Align) -> Option<TaffyAlignContent> {
    Some(match align {
        Align::Center => TaffyAlignContent::Center,
        Align::FlexEnd => TaffyAlignContent::FlexEnd,
        Align::Stretch => TaffyAlignContent::Stretch,
        Align::SpaceBetween => TaffyAlignContent::SpaceBetween,
        Align::SpaceAround => TaffyAlignContent::SpaceAround,
        _ => TaffyAlignContent::FlexStart,
    })
}

fn to_taffy_overflow(overflow: Overflow) -> TaffyOverflow {
    match overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Hidden,
        Overflow::Scroll => TaffyOverflow::Scroll,
    }
}

fn to_taffy_display(display: Display) -> TaffyDisplay {
    match display {
        Display::Flex => TaffyDisplay::Flex,
        Display::None => TaffyDisplay::None,
    }
}

fn to_taffy_position(position: Position) -> TaffyPosition {
    match position {
        Position::Relative => TaffyPosition::Relative,
        Position::Absolute => TaffyPosition::Absolute,
    }
}

// =============================================================================
// EDGE VALUES
// =============================================================================

/// Edge keys in the order they are applied: later entries win for their edge.
const EDGE_ORDER: [&str; 10] = [
    "", "All", "Horizontal", "Vertical", "Start", "End", "Left", "Right", "Top", "Bottom",
];

/// Set the edges named by `edge` on `rect`.
///
/// Start/End resolve to Left/Right (left-to-right layout direction).
fn set_edge<T: Copy>(rect: &mut Rect<T>, edge: &str, value: T) {
    match edge {
        "" | "All" => {
            rect.left = value;
            rect.right = value;
            rect.top = value;
            rect.bottom = value;
        }
        "Horizontal" => {
            rect.left = value;
            rect.right = value;
        }
        "Vertical" => {
            rect.top = value;
            rect.bottom = value;
        }
        "Left" | "Start" => rect.left = value,
        "Right" | "End" => rect.right = value,
        "Top" => rect.top = value,
        "Bottom" => rect.bottom = value,
        _ => {}
    }
}

/// Apply one edge entry; returns `false` if it was malformed.
fn apply_edge<T: Copy>(
    rect: &mut Rect<T>,
    edge: &str,
    value: &Value,
    convert: fn(Dimension) -> Option<T>,
) -> bool {
    match parse_dimension(value).and_then(convert) {
        Some(converted) => {
            set_edge(rect, edge, converted);
            true
        }
        None => false,
    }
}

/// Apply a spacing family (`margin`, `padding`, position offsets).
///
/// The grouped key may hold a single dimension (all edges) or an edge map
/// `{"": .., Left: .., Horizontal: ..}`; flat keys like `marginLeft` follow.
/// Per-edge values override the all-edges value for that edge only.
fn apply_edge_family<T: Copy>(
    rect: &mut Rect<T>,
    props: &Props,
    group_key: &str,
    flat_prefix: &str,
    convert: fn(Dimension) -> Option<T>,
) {
    if let Some(group) = props.get(group_key) {
        match group {
            Value::Object(map) if !is_dimension_object(map) => {
                for edge in EDGE_ORDER {
                    if let Some(value) = map.get(edge) {
                        if !apply_edge(rect, edge, value, convert) {
                            debug!(property = group_key, edge, "skipping malformed edge value");
                        }
                    }
                }
            }
            value => {
                if !apply_edge(rect, "", value, convert) {
                    debug!(property = group_key, "skipping malformed spacing value");
                }
            }
        }
    }

    for edge in EDGE_ORDER.iter().skip(1) {
        let key = flat_key(flat_prefix, edge);
        if let Some(value) = props.get(&key) {
            if !apply_edge(rect, edge, value, convert) {
                debug!(property = %key, "skipping malformed edge value");
            }
        }
    }
}

/// `margin` + `Left` -> `marginLeft`; an empty prefix lowercases the edge
/// (`left`, `top`, ...) for position offsets.
fn flat_key(prefix: &str, edge: &str) -> String {
    if prefix.is_empty() {
        edge.to_ascii_lowercase()
    } else {
        format!("{prefix}{edge}")
    }
}

// =============================================================================
// PROPERTY FAMILIES
// =============================================================================

fn apply_dimensions(style: &mut Style, props: &Props) {
    let targets: [(&str, &mut TaffyDimension); 7] = [
        ("width", &mut style.size.width),
        ("height", &mut style.size.height),
        ("minWidth", &mut style.min_size.width),
        ("minHeight", &mut style.min_size.height),
        ("maxWidth", &mut style.max_size.width),
        ("maxHeight", &mut style.max_size.height),
        ("flexBasis", &mut style.flex_basis),
    ];

    for (key, slot) in targets {
        let Some(value) = props.get(key) else { continue };
        match parse_dimension(value).and_then(to_taffy_dimension) {
            Some(dim) => *slot = dim,
            None => debug!(property = key, "skipping malformed dimension"),
        }
    }
}

fn apply_flex(style: &mut Style, props: &Props) {
    // `flex` shorthand first so explicit grow/shrink override it.
    if let Some(flex) = props.get("flex").and_then(number) {
        if flex > 0.0 {
            style.flex_grow = flex;
            style.flex_shrink = 1.0;
            style.flex_basis = TaffyDimension::Length(0.0);
        } else if flex < 0.0 {
            style.flex_grow = 0.0;
            style.flex_shrink = -flex;
            style.flex_basis = TaffyDimension::Auto;
        } else {
            style.flex_grow = 0.0;
            style.flex_shrink = 0.0;
            style.flex_basis = TaffyDimension::Auto;
        }
    }
    if let Some(grow) = props.get("flexGrow").and_then(number) {
        style.flex_grow = grow;
    }
    if let Some(shrink) = props.get("flexShrink").and_then(number) {
        style.flex_shrink = shrink;
    }
    if let Some(ratio) = props.get("aspectRatio").and_then(number) {
        style.aspect_ratio = (ratio > 0.0).then_some(ratio);
    }

    let keyword = |key: &str| props.get(key).and_then(Value::as_str);

    if let Some(dir) = keyword("flexDirection") {
        style.flex_direction = to_taffy_flex_direction(FlexDirection::from_css(dir));
    }
    if let Some(wrap) = keyword("flexWrap") {
        style.flex_wrap = to_taffy_flex_wrap(FlexWrap::from_css(wrap));
    }
    if let Some(justify) = keyword("justifyContent") {
        style.justify_content = to_taffy_justify_content(JustifyContent::from_css(justify));
    }
    if let Some(align) = keyword("alignItems") {
        style.align_items = to_taffy_align_items(Align::from_css(align, Align::Stretch));
    }
    if let Some(align) = keyword("alignSelf") {
        style.align_self = to_taffy_align_self(Align::from_css(align, Align::Auto));
    }
    if let Some(align) = keyword("alignContent") {
        style.align_content = to_taffy_align_content(Align::from_css(align, Align::FlexStart));
    }
    if let Some(display) = keyword("display") {
        style.display = to_taffy_display(Display::from_css(display));
    }
    if let Some(overflow) = keyword("overflow") {
        let overflow = to_taffy_overflow(Overflow::from_css(overflow));
        style.overflow = Point {
            x: overflow,
            y: overflow,
        };
    }
    if let Some(position) = keyword("position") {
        style.position = to_taffy_position(Position::from_css(position));
    }
}

fn apply_appearance(view: &mut dyn NativeView, props: &Props) {
    let color = |key: &str| -> Option<Option<Rgba>> {
        let value = props.get(key)?;
        match value.as_str().and_then(Rgba::parse) {
            Some(rgba) => Some(Some(rgba)),
            None if value.is_null() => Some(None),
            None => {
                debug!(property = key, "skipping unparseable color");
                None
            }
        }
    };

    if let Some(bg) = color("backgroundColor") {
        view.appearance_mut().background_color = bg;
    }
    if let Some(border) = color("borderColor") {
        view.appearance_mut().border_color = border;
    }
    if let Some(width) = props.get("borderWidth").and_then(number) {
        let width = width.max(0.0);
        view.appearance_mut().border_width = width;
        let edge = LengthPercentage::Length(width);
        view.style_mut().border = Rect {
            left: edge,
            right: edge,
            top: edge,
            bottom: edge,
        };
    }
    if let Some(radius) = props.get("borderRadius").and_then(number) {
        view.appearance_mut().border_radius = radius.max(0.0);
    }
    if let Some(opacity) = props.get("opacity").and_then(number) {
        view.appearance_mut().opacity = opacity.clamp(0.0, 1.0);
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Apply a property bag to a native view's layout and appearance attributes.
///
/// A nested `style` object, when present, is applied after the top-level keys.
pub fn apply_properties(view: &mut dyn NativeView, props: &Props) {
    apply_bag(view, props);

    if let Some(Value::Object(style)) = props.get("style") {
        apply_bag(view, style);
    }

    view.set_needs_layout();
}

fn apply_bag(view: &mut dyn NativeView, props: &Props) {
    {
        let style = view.style_mut();
        // Shorthand first so an explicit `flexBasis` in the same bag wins.
        apply_flex(style, props);
        apply_dimensions(style, props);
        apply_edge_family(&mut style.margin, props, "margin", "margin", to_taffy_lpa);
        apply_edge_family(&mut style.padding, props, "padding", "padding", to_taffy_lp);
        apply_edge_family(&mut style.inset, props, "positionValues", "", to_taffy_lpa);
    }
    apply_appearance(view, props);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::HeadlessView;
    use serde_json::json;

    fn props(value: Value) -> Props {
        match value {
            Value::Object(map) => map,
            _ => panic!("props must be an object"),
        }
    }

    #[test]
    fn test_parse_dimension_forms() {
        assert_eq!(parse_dimension(&json!(12)), Some(Dimension::Point(12.0)));
        assert_eq!(parse_dimension(&json!("auto")), Some(Dimension::Auto));
        assert_eq!(parse_dimension(&json!("25%")), Some(Dimension::Percent(25.0)));
        assert_eq!(
            parse_dimension(&json!({"value": 50, "unit": "percent"})),
            Some(Dimension::Percent(50.0))
        );
        assert_eq!(
            parse_dimension(&json!({"value": 5, "unit": "furlong"})),
            Some(Dimension::Point(5.0))
        );
        assert_eq!(parse_dimension(&json!({"value": 5})), Some(Dimension::Point(5.0)));
        assert_eq!(parse_dimension(&json!({"unit": "auto"})), Some(Dimension::Auto));
        assert_eq!(parse_dimension(&json!({"unit": "point"})), None);
        assert_eq!(parse_dimension(&json!(true)), None);
    }

    #[test]
    fn test_incremental_update_keeps_width() {
        let mut view = HeadlessView::new("View");
        apply_properties(&mut view, &props(json!({"width": {"value": 50, "unit": "percent"}})));
        apply_properties(&mut view, &props(json!({"height": {"value": 10, "unit": "point"}})));

        assert_eq!(view.style().size.width, TaffyDimension::Percent(0.5));
        assert_eq!(view.style().size.height, TaffyDimension::Length(10.0));
    }

    #[test]
    fn test_edge_override_only_touches_that_edge() {
        let mut view = HeadlessView::new("View");
        apply_properties(
            &mut view,
            &props(json!({
                "margin": {"": {"value": 4}, "Left": {"value": 10}},
                "padding": {"value": 2},
                "paddingVertical": {"value": 6},
            })),
        );

        let style = view.style();
        assert_eq!(style.margin.left, LengthPercentageAuto::Length(10.0));
        assert_eq!(style.margin.right, LengthPercentageAuto::Length(4.0));
        assert_eq!(style.margin.top, LengthPercentageAuto::Length(4.0));
        assert_eq!(style.padding.left, LengthPercentage::Length(2.0));
        assert_eq!(style.padding.top, LengthPercentage::Length(6.0));
        assert_eq!(style.padding.bottom, LengthPercentage::Length(6.0));
    }

    #[test]
    fn test_absent_spacing_left_untouched() {
        let mut view = HeadlessView::new("View");
        apply_properties(&mut view, &props(json!({"marginTop": 8})));
        apply_properties(&mut view, &props(json!({"marginLeft": 3})));

        assert_eq!(view.style().margin.top, LengthPercentageAuto::Length(8.0));
        assert_eq!(view.style().margin.left, LengthPercentageAuto::Length(3.0));
    }

    #[test]
    fn test_position_offsets() {
        let mut view = HeadlessView::new("View");
        apply_properties(
            &mut view,
            &props(json!({
                "position": "absolute",
                "positionValues": {"Top": {"value": 5}, "End": {"value": 20, "unit": "percent"}},
                "left": 7,
            })),
        );

        let style = view.style();
        assert_eq!(style.position, TaffyPosition::Absolute);
        assert_eq!(style.inset.top, LengthPercentageAuto::Length(5.0));
        assert_eq!(style.inset.right, LengthPercentageAuto::Percent(0.2));
        assert_eq!(style.inset.left, LengthPercentageAuto::Length(7.0));
    }

    #[test]
    fn test_enum_fallbacks() {
        let mut view = HeadlessView::new("View");
        apply_properties(
            &mut view,
            &props(json!({
                "flexDirection": "sideways",
                "justifyContent": "everywhere",
                "alignItems": "center",
                "overflow": "hidden",
                "display": "none",
            })),
        );

        let style = view.style();
        assert_eq!(style.flex_direction, TaffyFlexDirection::Column);
        assert_eq!(style.justify_content, Some(TaffyJustifyContent::FlexStart));
        assert_eq!(style.align_items, Some(TaffyAlignItems::Center));
        assert_eq!(style.overflow.x, TaffyOverflow::Hidden);
        assert_eq!(style.display, TaffyDisplay::None);
    }

    #[test]
    fn test_flex_shorthand_then_explicit() {
        let mut view = HeadlessView::new("View");
        apply_properties(&mut view, &props(json!({"flex": 2, "flexShrink": 0})));

        let style = view.style();
        assert_eq!(style.flex_grow, 2.0);
        assert_eq!(style.flex_shrink, 0.0);
        assert_eq!(style.flex_basis, TaffyDimension::Length(0.0));
    }

    #[test]
    fn test_flex_keeps_explicit_basis() {
        let mut view = HeadlessView::new("View");
        apply_properties(&mut view, &props(json!({"flex": 1, "flexBasis": {"value": 50}})));

        let style = view.style();
        assert_eq!(style.flex_grow, 1.0);
        assert_eq!(style.flex_basis, TaffyDimension::Length(50.0));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let mut view = HeadlessView::new("View");
        apply_properties(
            &mut view,
            &props(json!({
                "backgroundColor": "#nothex",
                "width": {"unit": "percent"},
                "height": 40,
                "borderColor": "#80ff0000",
                "borderWidth": "thick",
                "borderRadius": 6,
            })),
        );

        assert_eq!(view.appearance().background_color, None);
        assert_eq!(view.style().size.width, TaffyDimension::Auto);
        assert_eq!(view.style().size.height, TaffyDimension::Length(40.0));
        assert_eq!(view.appearance().border_color, Some(Rgba::new(255, 0, 0, 128)));
        assert_eq!(view.appearance().border_width, 0.0);
        assert_eq!(view.appearance().border_radius, 6.0);
    }

    #[test]
    fn test_nested_style_map() {
        let mut view = HeadlessView::new("View");
        apply_properties(
            &mut view,
            &props(json!({"style": {"backgroundColor": "#00ff00", "borderWidth": 2}})),
        );

        assert_eq!(view.appearance().background_color, Some(Rgba::rgb(0, 255, 0)));
        assert_eq!(view.style().border.top, LengthPercentage::Length(2.0));
        assert_eq!(view.layout_requests(), 1);
    }
}
