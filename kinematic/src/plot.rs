//! The functions used to plot the four-bar sweep.
pub use plotters::{prelude::*, *};
use crate::FourBar;

type PResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Get font setting.
pub fn font() -> TextStyle<'static> {
    ("Times New Roman", 24).into_font().color(&BLACK)
}

/// Plot the paths of joint `C` and `D` of a sweep with `res` steps, and the
/// linkage at the first feasible angle.
///
/// Infeasible angles break the paths.
pub fn plot_sweep<B>(backend: B, title: &str, fb: &FourBar, res: usize) -> PResult
where
    B: DrawingBackend,
    B::ErrorType: 'static,
{
    let frames = fb.sweep(res).map(|(_, pose)| pose).collect::<Vec<_>>();
    let first = frames.iter().flatten().next().ok_or("no feasible angle")?;
    // Split into contiguous feasible segments
    let mut c_paths = Vec::new();
    let mut d_paths = Vec::new();
    for seg in frames.split(Option::is_none).filter(|seg| !seg.is_empty()) {
        let poses = seg.iter().flatten();
        c_paths.push(poses.clone().map(|p| p.c).collect::<Vec<_>>());
        d_paths.push(poses.map(|p| p.d).collect::<Vec<_>>());
    }
    let linkage = [first.a, first.c, first.d, first.b];
    let mut curves = vec![("", &linkage[..])];
    curves.extend(c_paths.iter().chain(&d_paths).map(|p| ("", p.as_slice())));
    let [x_min, x_max, y_min, y_max] = bounding_box(&curves);

    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, font())
        .set_label_area_size(LabelAreaPosition::Left, (8).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (4).percent())
        .margin((8).percent())
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_label_style(font())
        .y_label_style(font())
        .draw()?;
    for (i, (label, paths)) in [("Joint C", &c_paths), ("Joint D", &d_paths)]
        .into_iter()
        .enumerate()
    {
        let color = Palette99::pick(i).to_rgba();
        for (n, path) in paths.iter().enumerate() {
            let series = chart.draw_series(LineSeries::new(
                path.iter().map(|&[x, y]| (x, y)),
                &color,
            ))?;
            if n == 0 {
                series
                    .label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
            }
        }
    }
    let link = linkage.iter().map(|&[x, y]| (x, y));
    chart.draw_series(LineSeries::new(link.clone(), &BLACK))?;
    chart.draw_series(link.map(|c| Circle::new(c, 5, BLACK.filled())))?;
    chart
        .configure_series_labels()
        .background_style(&WHITE)
        .border_style(&BLACK)
        .label_font(font())
        .draw()?;
    Ok(())
}

/// Get the bounding box of the data, ignore the labels.
///
/// The box is square, so the linkage keeps its proportion.
pub fn bounding_box<L>(curves: &[(L, &[[f64; 2]])]) -> [f64; 4] {
    let mut b = [f64::INFINITY, -f64::INFINITY, f64::INFINITY, -f64::INFINITY];
    for &[x, y] in curves.iter().flat_map(|(_, curve)| curve.iter()) {
        b = [b[0].min(x), b[1].max(x), b[2].min(y), b[3].max(y)];
    }
    let [x_min, x_max, y_min, y_max] = b;
    let dx = (x_max - x_min).abs();
    let dy = (y_max - y_min).abs();
    if dx > dy {
        let cen = (y_min + y_max) * 0.5;
        let r = dx * 0.5;
        [x_min, x_max, cen - r, cen + r]
    } else {
        let cen = (x_min + x_max) * 0.5;
        let r = dy * 0.5;
        [cen - r, cen + r, y_min, y_max]
    }
}
