//! Renderer tests
//!
//! Tests for the strict and high-level serialization entry points

use reinhardt_markup::sanitize::{parse_classes, sanitize_class_str};
use reinhardt_markup::{
	AttrValue, InnerHtml, RenderOptions, Renderer, StrictAttributes, StrictValue, attributes,
	close, open, open_strict, parse_tag_selector, render, render_strict,
};
use rstest::rstest;

#[rstest]
#[case("div.a.b#id", "div", "id", "a b")]
#[case("div#id#other", "div", "id", "")]
#[case("div", "div", "", "")]
fn test_parse_tag_selector(
	#[case] selector: &str,
	#[case] tag: &str,
	#[case] id: &str,
	#[case] classes: &str,
) {
	let parsed = parse_tag_selector(selector);
	assert_eq!(parsed.tag, tag);
	assert_eq!(parsed.id, id);
	assert_eq!(parsed.classes, classes);
}

#[test]
fn test_render_empty_div() {
	assert_eq!(render("div", "", attributes! {}, true), "<div></div>");
}

#[test]
fn test_render_single_class() {
	assert_eq!(
		render("div", "", attributes! { "class" => "class-1" }, true),
		"<div class=\"class-1\"></div>"
	);
}

#[test]
fn test_render_bare_required() {
	let html = render("input", "", attributes! { "required" => true }, true);
	assert!(html.contains(" required"));
	assert!(!html.contains("required="));
}

#[rstest]
#[case(AttrValue::from("class-1 class-2"))]
#[case(AttrValue::list(["class-1", "class-2"]))]
#[case(AttrValue::map([("class-1", true), ("class-2", true)]))]
fn test_class_input_shapes_render_alike(#[case] class: AttrValue) {
	assert_eq!(
		render("p", "", attributes! { "class" => class }, true),
		"<p class=\"class-1 class-2\"></p>"
	);
}

#[test]
fn test_class_script_injection_is_stripped() {
	// Test: Angle brackets never survive class sanitization
	let cleaned = sanitize_class_str("class-<script>");
	assert!(!cleaned.contains('<'));
	assert!(!cleaned.contains('>'));

	let html = render("div", "", attributes! { "class" => "x\"><script>" }, true);
	assert_eq!(html, "<div class=\"xscript\"></div>");
}

#[rstest]
#[case(AttrValue::from("token"))]
#[case(AttrValue::list(["token"]))]
#[case(AttrValue::map([("token", true)]))]
fn test_parse_classes_single_token_shapes(#[case] value: AttrValue) {
	assert_eq!(parse_classes(&value), "token");
}

#[test]
fn test_attribute_value_quotes_are_escaped() {
	// Test: Quotes in generic values cannot break out of the attribute
	let html = render("a", "", attributes! { "title" => "say \"hi\"" }, true);
	assert_eq!(html, r#"<a title="say \"hi\""></a>"#);
}

#[test]
fn test_structured_value_is_json_encoded() {
	let html = render(
		"div",
		"",
		attributes! { "data-items" => AttrValue::list(["a", "<b>"]) },
		true,
	);
	assert_eq!(
		html,
		"<div data-items=\"[&quot;a&quot;,&quot;&lt;b&gt;&quot;]\"></div>"
	);
}

#[test]
fn test_structured_style_is_dropped() {
	let html = render(
		"div",
		"",
		attributes! { "style" => AttrValue::map([("color", "red")]) },
		true,
	);
	assert_eq!(html, "<div style=\"\"></div>");
}

#[rstest]
#[case(false, "<input disabled=\"\" />")]
#[case(true, "<input disabled />")]
fn test_boolean_values(#[case] flag: bool, #[case] expected: &str) {
	assert_eq!(render("input", "", attributes! { "disabled" => flag }, true), expected);
}

#[test]
fn test_integer_and_null_values() {
	let html = render(
		"td",
		"",
		attributes! { "colspan" => 2, "title" => AttrValue::Null },
		true,
	);
	assert_eq!(html, "<td colspan=\"2\" title=\"\"></td>");
}

#[test]
fn test_selector_classes_append_to_list() {
	let html = render(
		"li.last",
		"",
		attributes! { "class" => AttrValue::list(["item"]) },
		true,
	);
	assert_eq!(html, "<li class=\"item last\"></li>");
}

#[test]
fn test_selector_id_fills_falsy_id() {
	let html = render("div#main", "", attributes! { "id" => "" }, true);
	assert_eq!(html, "<div id=\"main\"></div>");
}

#[test]
fn test_inner_html_is_not_escaped() {
	assert_eq!(
		render("div", "<em>hi</em>", attributes! {}, true),
		"<div><em>hi</em></div>"
	);
}

#[test]
fn test_inner_zero_string_renders() {
	assert_eq!(render("span", "0", attributes! {}, true), "<span>0</span>");
}

#[test]
fn test_producer_runs_once() {
	let mut calls = 0;
	let html = render(
		"p",
		InnerHtml::producer(|| {
			calls += 1;
			"body".to_string()
		}),
		attributes! {},
		true,
	);
	assert_eq!(html, "<p>body</p>");
	assert_eq!(calls, 1);
}

#[test]
fn test_open_and_close() {
	assert_eq!(
		open("section.wide#intro", attributes! {}),
		"<section class=\"wide\" id=\"intro\">"
	);
	assert_eq!(close("section.wide#intro"), "</section>");
	assert_eq!(close("meta"), "");
}

#[test]
fn test_open_strict() {
	let mut attrs = StrictAttributes::new();
	attrs.insert("charset".to_string(), "utf-8".into());
	assert_eq!(open_strict("meta", &attrs), "<meta charset=\"utf-8\" />");
}

#[test]
fn test_render_strict_passes_values_through() {
	let mut attrs = StrictAttributes::new();
	attrs.insert("hidden".to_string(), StrictValue::Bare);
	attrs.insert("onclick".to_string(), "go()".into());
	assert_eq!(
		render_strict("button", "Go", &attrs, true),
		"<button hidden onclick=\"go()\">Go</button>"
	);
}

#[rstest]
#[case("input")]
#[case("img")]
#[case("hr")]
#[case("br")]
#[case("meta")]
#[case("link")]
fn test_self_closing_tags_never_close(#[case] tag: &str) {
	let slash = Renderer::new();
	let bare = Renderer::with_options(RenderOptions::new().self_closing_slash(false));

	assert_eq!(slash.render(tag, "", attributes! {}, true), format!("<{tag} />"));
	assert_eq!(bare.render(tag, "", attributes! {}, true), format!("<{tag}>"));
}

#[test]
fn test_renderers_with_different_options_coexist() {
	let xhtml = Renderer::new();
	let html5 = Renderer::with_options(RenderOptions::new().html5());
	assert_eq!(xhtml.render("br", "", attributes! {}, true), "<br />");
	assert_eq!(html5.render("br", "", attributes! {}, true), "<br>");
	assert_eq!(xhtml.render("br", "", attributes! {}, true), "<br />");
}
