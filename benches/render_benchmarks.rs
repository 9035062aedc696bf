//! Rendering benchmarks
//!
//! Benchmarks for markup serialization:
//! - Tag selector parsing
//! - High-level and strict rendering of single tags
//! - Rendering of wide and deep element trees

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reinhardt_markup::{
	AttrValue, Element, StrictAttributes, StrictValue, attributes, parse_tag_selector, render,
	render_strict,
};
use std::hint::black_box;

fn benchmark_selector(c: &mut Criterion) {
	c.bench_function("parse_tag_selector_plain", |b| {
		b.iter(|| black_box(parse_tag_selector(black_box("div"))));
	});

	c.bench_function("parse_tag_selector_compound", |b| {
		b.iter(|| black_box(parse_tag_selector(black_box("div.card.active.wide#main"))));
	});
}

fn benchmark_single_tag(c: &mut Criterion) {
	c.bench_function("render_high_level", |b| {
		b.iter(|| {
			black_box(render(
				"input.field#email",
				"",
				attributes! {
					"type" => "email",
					"name" => "email",
					"required" => true,
					"class" => AttrValue::list(["wide", "rounded"]),
					"data-config" => AttrValue::map([("min", 3), ("max", 64)]),
				},
				true,
			))
		});
	});

	let mut strict = StrictAttributes::new();
	strict.insert("type".to_string(), "email".into());
	strict.insert("name".to_string(), "email".into());
	strict.insert("required".to_string(), StrictValue::Bare);

	c.bench_function("render_strict", |b| {
		b.iter(|| black_box(render_strict("input", "", &strict, true)));
	});
}

fn wide_tree(width: usize) -> Element {
	let mut list = Element::new("ul.items");
	for i in 0..width {
		let mut item = Element::new("li").child(format!("Item {i}"));
		item.add_class("item");
		if i % 2 == 0 {
			item.add_class("even");
		}
		list.append_child(item);
	}
	list
}

fn deep_tree(depth: usize) -> Element {
	(0..depth).fold(Element::new("span").child("leaf"), |inner, i| {
		Element::new("div").attr("data-depth", i).child(inner)
	})
}

fn benchmark_tree(c: &mut Criterion) {
	let mut group = c.benchmark_group("element_tree");

	for size in [10, 100, 1000] {
		let tree = wide_tree(size);
		group.bench_with_input(BenchmarkId::new("wide", size), &tree, |b, tree| {
			b.iter(|| black_box(tree.render()));
		});
	}

	for depth in [10, 50, 500, 2000] {
		let tree = deep_tree(depth);
		group.bench_with_input(BenchmarkId::new("deep", depth), &tree, |b, tree| {
			b.iter(|| black_box(tree.render()));
		});
	}

	group.finish();
}

criterion_group!(
	benches,
	benchmark_selector,
	benchmark_single_tag,
	benchmark_tree
);
criterion_main!(benches);
