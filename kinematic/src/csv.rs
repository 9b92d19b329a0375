//! Functions for writing CSV format.
use crate::FourBar;
use csv::Writer;
use serde::Serialize;

/// One row of a four-bar sweep, infeasible angles have empty fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepRow {
    /// Input angle
    pub angle: f64,
    /// X of joint `C`
    pub cx: Option<f64>,
    /// Y of joint `C`
    pub cy: Option<f64>,
    /// X of joint `D`
    pub dx: Option<f64>,
    /// Y of joint `D`
    pub dy: Option<f64>,
    /// Output angle
    pub output: Option<f64>,
}

/// Dump CSV to string.
pub fn dump_csv<'a, C, S>(c: C) -> Result<String, Box<dyn std::error::Error>>
where
    C: Into<std::borrow::Cow<'a, [S]>>,
    S: Serialize + Clone + 'a,
{
    let mut w = Writer::from_writer(Vec::new());
    let v = c.into().into_owned();
    v.into_iter().try_for_each(|c| w.serialize(c))?;
    Ok(String::from_utf8(w.into_inner()?)?)
}

/// Rows of a sweep over `[0, 2π)` with `res` steps.
pub fn sweep_rows(fb: &FourBar, res: usize) -> Vec<SweepRow> {
    fb.sweep(res)
        .map(|(angle, pose)| SweepRow {
            angle,
            cx: pose.as_ref().map(|p| p.c[0]),
            cy: pose.as_ref().map(|p| p.c[1]),
            dx: pose.as_ref().map(|p| p.d[0]),
            dy: pose.as_ref().map(|p| p.d[1]),
            output: pose.as_ref().map(|p| p.output_angle),
        })
        .collect()
}

/// Dump a sweep over `[0, 2π)` with `res` steps to CSV string.
pub fn sweep_csv(fb: &FourBar, res: usize) -> Result<String, Box<dyn std::error::Error>> {
    dump_csv(sweep_rows(fb, res))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_gaps() {
        let fb = FourBar::new(4., 3., 2., 2.).unwrap();
        let s = sweep_csv(&fb, 4).unwrap();
        let lines = s.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "angle,cx,cy,dx,dy,output");
        assert!(lines[1].starts_with("0.0,3.0,0.0,"));
        // Half turn is out of the angle bound
        assert!(lines[3].ends_with(",,,,,"));
    }
}
