//! Grouped bar charts over parsed benchmark records.

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use pqcviz_core::{ChartKind, Field, FieldValue, ImageFormat, Record, ReportConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ethernet MTU, drawn as a reference line on the artifact chart.
pub const MTU_BYTES: f64 = 1500.0;

// Font sizes in pixels at 100 dpi; scaled by `ReportConfig::text_scale`.
const TITLE_FONT_SIZE: f64 = 22.0;
const AXIS_LABEL_FONT_SIZE: f64 = 17.0;
const TICK_LABEL_FONT_SIZE: f64 = 14.0;
const LEGEND_FONT_SIZE: f64 = 14.0;
const DATA_LABEL_FONT_SIZE: f64 = 13.0;

const GROUP_WIDTH: f64 = 0.8;
const EDGE_COLOR: RGBColor = RGBColor(51, 51, 51);

const VIRIDIS: &[RGBColor] = &[
	RGBColor(68, 1, 84),
	RGBColor(70, 50, 126),
	RGBColor(54, 92, 141),
	RGBColor(39, 127, 142),
	RGBColor(31, 161, 135),
	RGBColor(74, 193, 109),
	RGBColor(160, 218, 57),
	RGBColor(253, 231, 37),
];

const MAGMA: &[RGBColor] = &[
	RGBColor(28, 16, 68),
	RGBColor(79, 18, 123),
	RGBColor(129, 37, 129),
	RGBColor(181, 54, 122),
	RGBColor(229, 80, 100),
	RGBColor(251, 135, 97),
	RGBColor(254, 194, 135),
];

const MUTED: &[RGBColor] = &[
	RGBColor(72, 120, 208),
	RGBColor(238, 133, 74),
	RGBColor(106, 204, 100),
	RGBColor(214, 95, 95),
	RGBColor(149, 108, 180),
	RGBColor(140, 97, 60),
	RGBColor(220, 126, 192),
	RGBColor(121, 121, 121),
	RGBColor(213, 187, 103),
	RGBColor(130, 198, 226),
];

/// One chart: which fields go where and how it is titled and scaled.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
	pub kind: ChartKind,
	pub title: &'a str,
	pub file_stem: &'a str,
	pub y_label: &'a str,
	pub x: Field,
	pub y: Field,
	pub hue: Field,
	pub log_scale: bool,
	pub show_mtu: bool,
}

/// Sequential palettes are sampled evenly; the categorical one is taken in order.
pub fn series_color(kind: ChartKind, index: usize, count: usize) -> RGBColor {
	let palette = match kind {
		ChartKind::Kem => VIRIDIS,
		ChartKind::Signature => MAGMA,
		ChartKind::Artifact => return MUTED[index % MUTED.len()],
	};
	if count <= 1 {
		return palette[palette.len() / 2];
	}
	if count > palette.len() {
		return palette[index % palette.len()];
	}
	palette[index * (palette.len() - 1) / (count - 1)]
}

/// Text drawn above a bar.
pub fn format_value_label(value: f64) -> String {
	if value == 0.0 {
		String::new()
	} else if value >= 10_000.0 {
		format!("{:.0}k", value / 1000.0)
	} else if value >= 1000.0 {
		format!("{:.1}k", value / 1000.0)
	} else if value < 1.0 {
		format!("{value:.2}")
	} else {
		format!("{value:.0}")
	}
}

/// Records pivoted into categories × series. Duplicate pairs are averaged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedBars {
	pub categories: Vec<String>,
	pub series: Vec<String>,
	/// `values[series][category]`; `None` where no record exists.
	pub values: Vec<Vec<Option<f64>>>,
}

fn position_or_push(keys: &mut Vec<String>, key: String) -> usize {
	match keys.iter().position(|k| *k == key) {
		Some(i) => i,
		None => {
			keys.push(key);
			keys.len() - 1
		}
	}
}

impl GroupedBars {
	pub fn from_records<R: Record>(records: &[R], x: Field, y: Field, hue: Field) -> Self {
		let mut categories = Vec::new();
		let mut series = Vec::new();
		let mut sums: HashMap<(usize, usize), (f64, usize)> = HashMap::new();
		for record in records {
			let (Some(cat), Some(group), Some(value)) =
				(record.field(x), record.field(hue), record.field(y).and_then(FieldValue::as_number))
			else {
				continue;
			};
			let c = position_or_push(&mut categories, cat.to_key());
			let s = position_or_push(&mut series, group.to_key());
			let entry = sums.entry((s, c)).or_insert((0.0, 0));
			entry.0 += value;
			entry.1 += 1;
		}
		let values = (0..series.len())
			.map(|s| (0..categories.len()).map(|c| sums.get(&(s, c)).map(|(sum, n)| sum / *n as f64)).collect())
			.collect();
		Self { categories, series, values }
	}

	pub fn is_empty(&self) -> bool { self.categories.is_empty() }

	fn present_values(&self) -> impl Iterator<Item = f64> + '_ { self.values.iter().flatten().filter_map(|v| *v) }

	pub fn max_value(&self) -> f64 { self.present_values().fold(0.0, f64::max) }

	pub fn min_positive(&self) -> Option<f64> {
		self.present_values().filter(|v| *v > 0.0).reduce(f64::min)
	}
}

/// Y axis in drawing coordinates. Log axes are drawn in log10 space with decade ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
struct YAxis {
	log: bool,
	lo: f64,
	hi: f64,
}

impl YAxis {
	fn fit(bars: &GroupedBars, log: bool, reference: Option<f64>) -> Self {
		let max = reference.map_or(bars.max_value(), |r| bars.max_value().max(r));
		if !log {
			let hi = if max > 0.0 { max * 1.15 } else { 1.0 };
			return Self { log, lo: 0.0, hi };
		}
		let min = match (bars.min_positive(), reference) {
			(Some(m), Some(r)) => m.min(r),
			(Some(m), None) => m,
			(None, Some(r)) => r,
			(None, None) => 1.0,
		};
		let lo = min.log10().floor();
		let top = max.max(min).log10();
		// headroom for the value labels above the tallest bar
		let mut hi = top.ceil();
		if hi - top < 0.25 {
			hi += 1.0;
		}
		Self { log, lo, hi: hi.max(lo + 1.0) }
	}

	fn project(&self, value: f64) -> Option<f64> {
		if !self.log {
			return Some(value);
		}
		(value > 0.0).then(|| value.log10())
	}

	fn span(&self) -> f64 { self.hi - self.lo }

	fn tick_count(&self) -> usize {
		if self.log { self.span().round() as usize + 1 } else { 8 }
	}

	fn tick_label(&self, y: f64) -> String {
		if !self.log {
			return format_axis_value(y);
		}
		if (y - y.round()).abs() > 1e-6 {
			return String::new();
		}
		format_axis_value(10f64.powi(y.round() as i32))
	}
}

fn format_axis_value(v: f64) -> String {
	if v != 0.0 && (v.abs() >= 1e6 || v.abs() < 0.01) {
		format!("{v:.0e}")
	} else if v.fract() == 0.0 {
		format!("{v:.0}")
	} else {
		format!("{v}")
	}
}

fn category_at(categories: &[String], x: f64) -> String {
	let idx = x.round();
	if idx < 0.0 || (x - idx).abs() > 0.3 {
		return String::new();
	}
	categories.get(idx as usize).cloned().unwrap_or_default()
}

/// Fail early, before any file is written, when the format was not compiled in.
pub fn ensure_supported(format: ImageFormat) -> Result<()> {
	if format == ImageFormat::Png && !cfg!(feature = "png") {
		anyhow::bail!("png output requires building pqcviz with the `png` feature");
	}
	Ok(())
}

/// Render `records` per `spec` into `<output_dir>/<file_stem>.<ext>` and return the path.
pub fn render_chart<R: Record>(records: &[R], spec: &ChartSpec<'_>, cfg: &ReportConfig) -> Result<PathBuf> {
	ensure_supported(cfg.format)?;
	std::fs::create_dir_all(&cfg.output_dir)
		.with_context(|| format!("failed to create output directory {}", cfg.output_dir.display()))?;
	let path = cfg.output_dir.join(format!("{}.{}", spec.file_stem, cfg.format.extension()));
	let bars = GroupedBars::from_records(records, spec.x, spec.y, spec.hue);
	debug!(chart = spec.file_stem, categories = bars.categories.len(), series = bars.series.len(), "rendering chart");

	match cfg.format {
		ImageFormat::Svg => {
			let root = SVGBackend::new(&path, cfg.canvas_size()).into_drawing_area();
			draw_grouped_bars(&root, &bars, spec, cfg.text_scale())
				.with_context(|| format!("failed to draw {}", path.display()))?;
			root.present().with_context(|| format!("failed to write {}", path.display()))?;
		}
		ImageFormat::Png => render_bitmap(&path, &bars, spec, cfg)?,
	}

	println!("Generated: {}", path.display());
	info!(path = %path.display(), "chart written");
	Ok(path)
}

#[cfg(feature = "png")]
fn render_bitmap(path: &Path, bars: &GroupedBars, spec: &ChartSpec<'_>, cfg: &ReportConfig) -> Result<()> {
	let root = BitMapBackend::new(path, cfg.canvas_size()).into_drawing_area();
	draw_grouped_bars(&root, bars, spec, cfg.text_scale()).with_context(|| format!("failed to draw {}", path.display()))?;
	root.present().with_context(|| format!("failed to write {}", path.display()))?;
	Ok(())
}

#[cfg(not(feature = "png"))]
fn render_bitmap(_path: &Path, _bars: &GroupedBars, _spec: &ChartSpec<'_>, cfg: &ReportConfig) -> Result<()> {
	ensure_supported(cfg.format)
}

fn draw_grouped_bars<DB>(root: &DrawingArea<DB, Shift>, bars: &GroupedBars, spec: &ChartSpec<'_>, scale: f64) -> Result<()>
where
	DB: DrawingBackend,
	DB::ErrorType: 'static,
{
	let px = |base: f64| (base * scale).round().max(1.0);
	root.fill(&WHITE)?;

	let reference = spec.show_mtu.then_some(MTU_BYTES);
	let axis = YAxis::fit(bars, spec.log_scale, reference);
	let num_categories = bars.categories.len().max(1);
	let num_series = bars.series.len().max(1);

	let mut chart = ChartBuilder::on(root)
		.caption(spec.title, ("sans-serif", px(TITLE_FONT_SIZE), FontStyle::Bold))
		.margin(px(20.0) as u32)
		.x_label_area_size(px(50.0) as u32)
		.y_label_area_size(px(80.0) as u32)
		.build_cartesian_2d(-0.5..(num_categories as f64 - 0.5), axis.lo..axis.hi)?;

	let x_fmt = |x: &f64| category_at(&bars.categories, *x);
	let y_fmt = |y: &f64| axis.tick_label(*y);
	chart
		.configure_mesh()
		.disable_x_mesh()
		.x_labels(num_categories)
		.x_label_formatter(&x_fmt)
		.y_labels(axis.tick_count())
		.y_label_formatter(&y_fmt)
		.y_desc(spec.y_label)
		.bold_line_style(BLACK.mix(0.15))
		.light_line_style(WHITE)
		.label_style(("sans-serif", px(TICK_LABEL_FONT_SIZE)))
		.axis_desc_style(("sans-serif", px(AXIS_LABEL_FONT_SIZE)))
		.draw()?;

	if axis.log {
		// faint minor gridlines at 2..9 within each decade
		let faint = BLACK.mix(0.1).stroke_width(1);
		let decades = axis.lo as i32..axis.hi as i32;
		for decade in decades {
			for step in 2..=9 {
				let y = f64::from(decade) + f64::from(step).log10();
				chart.draw_series(DashedLineSeries::new(vec![(-0.5, y), (num_categories as f64 - 0.5, y)], 4, 4, faint))?;
			}
		}
	}

	let bar_width = GROUP_WIDTH / num_series as f64;
	let label_pad = axis.span() * 0.01;
	let label_font = ("sans-serif", px(DATA_LABEL_FONT_SIZE)).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Bottom));

	for (s, name) in bars.series.iter().enumerate() {
		let color = series_color(spec.kind, s, bars.series.len());
		let offset = (s as f64 - (num_series as f64 - 1.0) / 2.0) * bar_width;
		let mut rects = Vec::new();
		let mut labels = Vec::new();
		for (c, value) in bars.values[s].iter().enumerate() {
			let Some(value) = *value else { continue };
			let Some(top) = axis.project(value) else { continue };
			let center = c as f64 + offset;
			let (left, right) = (center - bar_width / 2.0 + 0.01, center + bar_width / 2.0 - 0.01);
			rects.push([(left, axis.lo), (right, top)]);
			let text = format_value_label(value);
			if !text.is_empty() {
				labels.push(Text::new(text, (center, top + label_pad), label_font.clone()));
			}
		}

		chart
			.draw_series(rects.iter().map(|corners| Rectangle::new(*corners, color.filled())))?
			.label(name.as_str())
			.legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
		chart.draw_series(rects.iter().map(|corners| Rectangle::new(*corners, EDGE_COLOR.stroke_width(1))))?;
		chart.draw_series(labels)?;
	}

	if let Some(y) = reference.and_then(|r| axis.project(r)) {
		let line = RED.stroke_width(2);
		chart
			.draw_series(DashedLineSeries::new(vec![(-0.5, y), (num_categories as f64 - 0.5, y)], 10, 6, line))?
			.label("Ethernet MTU (1500 B)")
			.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line));
	}

	chart
		.configure_series_labels()
		.position(SeriesLabelPosition::UpperRight)
		.background_style(WHITE.mix(0.8))
		.border_style(BLACK)
		.label_font(("sans-serif", px(LEGEND_FONT_SIZE)))
		.draw()?;

	Ok(())
}
