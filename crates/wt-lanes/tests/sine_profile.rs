use std::f64::consts::PI;

use wt_core::{Image, Region, Rgb8};
use wt_lanes::{LaneExtractor, LayoutConfig};

const PAPER: Rgb8 = [255, 255, 255];
const GRID: Rgb8 = [234, 234, 234];
const INK: Rgb8 = [0, 0, 0];
const GRID_SPACING: usize = 40;

/// Page rows of a sine with `cycles` periods across `lane`, one per lane column.
fn sine_rows(lane: &Region, cycles: usize) -> Vec<usize> {
    let w = lane.width() as f64;
    let amp = (lane.height() as f64 - 20.0) / 2.0;
    let mid = lane.top as f64 + lane.height() as f64 / 2.0;
    (0..lane.width())
        .map(|x| {
            let phase = x as f64 / w * cycles as f64 * 2.0 * PI;
            (mid - amp * phase.sin()).round() as usize
        })
        .collect()
}

fn ruled_page(layout: &LayoutConfig) -> Image<Rgb8> {
    let canvas = *layout.canvas();
    let (w, h) = layout.page_size();
    Image::from_fn(w, h, |x, y| {
        let inside = (canvas.left..canvas.right).contains(&x)
            && (canvas.top..canvas.bottom).contains(&y);
        if !inside {
            PAPER
        } else if (x - canvas.left) % GRID_SPACING == 0 || (y - canvas.top) % GRID_SPACING == 0 {
            GRID
        } else {
            PAPER
        }
    })
}

/// Stamps a 3 pixel stroke joining consecutive rows, clipped to `lane`.
fn draw_trace(page: &mut Image<Rgb8>, lane: &Region, rows: &[usize]) {
    let mut prev = rows[0];
    for (x, &y) in rows.iter().enumerate() {
        let lo = prev.min(y).saturating_sub(1).max(lane.top);
        let hi = (prev.max(y) + 1).min(lane.bottom - 1);
        for col in x.saturating_sub(1)..=(x + 1).min(lane.width() - 1) {
            for row in lo..=hi {
                if let Some(px) = page.get_mut(lane.left + col, row) {
                    *px = INK;
                }
            }
        }
        prev = y;
    }
}

fn sine_page(layout: &LayoutConfig) -> (Image<Rgb8>, Vec<Vec<usize>>) {
    let mut page = ruled_page(layout);
    let mut expected = Vec::new();
    for (i, lane) in layout.lanes().iter().enumerate() {
        let rows = sine_rows(lane, i + 1);
        draw_trace(&mut page, lane, &rows);
        expected.push(rows);
    }
    (page, expected)
}

#[test]
fn sine_curves_survive_grid_removal() {
    let layout = LayoutConfig::default();
    let (page, expected) = sine_page(&layout);
    let ext = LaneExtractor::new(layout.clone());

    let traces = ext.extract_rgb8(&page.as_view()).expect("extract");
    assert_eq!(traces.len(), 6);

    for (trace, rows) in traces.iter().zip(&expected) {
        let lane = trace.region;
        assert_eq!(lane, layout.lanes()[trace.index]);
        assert!(!trace.points.is_empty(), "lane {} is empty", trace.index);

        let deviations: Vec<usize> = trace
            .points
            .iter()
            .map(|p| {
                let want = (lane.height() - 1) - (rows[p.x] - lane.top);
                p.y.abs_diff(want)
            })
            .collect();
        let mean = deviations.iter().sum::<usize>() as f64 / deviations.len() as f64;
        let max = deviations.iter().copied().max().unwrap_or(0);

        assert!(mean < 6.0, "lane {}: mean deviation {mean:.2}", trace.index);
        assert!(max < 15, "lane {}: max deviation {max}", trace.index);
    }
}

#[test]
fn traces_are_ordered_and_inside_their_lanes() {
    let layout = LayoutConfig::default();
    let (page, _) = sine_page(&layout);
    let traces = LaneExtractor::new(layout)
        .extract_rgb8(&page.as_view())
        .expect("extract");

    for trace in &traces {
        let (w, h) = (trace.region.width(), trace.region.height());
        assert_eq!((trace.mask.width(), trace.mask.height()), (w, h));
        assert!(trace.points.windows(2).all(|p| p[0].x < p[1].x));
        assert!(trace.points.iter().all(|p| p.x < w && p.y < h));

        let unit = trace.normalized().expect("default lanes are not degenerate");
        assert!(
            unit.iter()
                .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y))
        );
    }
}

#[test]
fn extraction_is_deterministic() {
    let layout = LayoutConfig::default();
    let (page, _) = sine_page(&layout);
    let ext = LaneExtractor::new(layout);

    let first = ext.extract_rgb8(&page.as_view()).expect("first run");
    let second = ext.extract_rgb8(&page.as_view()).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn grid_only_page_yields_near_empty_masks() {
    let layout = LayoutConfig::default();
    let page = ruled_page(&layout);
    let traces = LaneExtractor::new(layout)
        .extract_rgb8(&page.as_view())
        .expect("extract");

    for trace in &traces {
        let set = trace.mask.data().iter().filter(|&&v| v != 0).count();
        assert!(set < 50, "lane {}: {set} grid pixels leaked", trace.index);
    }
}
