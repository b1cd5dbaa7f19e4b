// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal ASCII DXF writer for reconstructed wall axes
//!
//! Emits an R12-style document with a LAYER table and LINE entities.
//! Structural walls land on `WALL_AXIS` (green), dimension lines on
//! `DIM_LINES` (blue). The target coordinate system has a flipped vertical
//! axis relative to image space, so every perpendicular coordinate is
//! negated on the way out.

use sketchplan_core::{DimensionLine, Orientation, WallAxis};
use std::fs;
use std::io::{self, Write};

const LAYER_WALLS: &str = "WALL_AXIS";
const LAYER_DIMENSIONS: &str = "DIM_LINES";

/// Write walls and dimension lines to an ASCII DXF file.
pub fn write_dxf(path: &str, walls: &[WallAxis], dimensions: &[DimensionLine]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;

    write_layer_table(&mut file)?;

    writeln!(file, "0\nSECTION\n2\nENTITIES")?;
    for wall in walls {
        let (p1, p2) = axis_endpoints(wall.orientation, wall.coord, wall.start, wall.end);
        write_line(&mut file, LAYER_WALLS, p1, p2)?;
    }
    for dim in dimensions {
        let (p1, p2) = axis_endpoints(dim.orientation, dim.coord, dim.start, dim.end);
        write_line(&mut file, LAYER_DIMENSIONS, p1, p2)?;
    }
    writeln!(file, "0\nENDSEC")?;
    writeln!(file, "0\nEOF")?;

    Ok(())
}

/// Map an axis into drawing space: horizontal walls run along X at `-coord`,
/// vertical walls along (negated) Y at `coord`.
fn axis_endpoints(
    orientation: Orientation,
    coord: f64,
    start: f64,
    end: f64,
) -> ((f64, f64), (f64, f64)) {
    match orientation {
        Orientation::Horizontal => ((start, -coord), (end, -coord)),
        Orientation::Vertical => ((coord, -start), (coord, -end)),
    }
}

fn write_layer_table(file: &mut fs::File) -> io::Result<()> {
    writeln!(file, "0\nSECTION\n2\nTABLES")?;
    writeln!(file, "0\nTABLE\n2\nLAYER\n70\n2")?;
    // color 3 = green, 5 = blue (AutoCAD color index)
    write_layer(file, LAYER_WALLS, 3)?;
    write_layer(file, LAYER_DIMENSIONS, 5)?;
    writeln!(file, "0\nENDTAB")?;
    writeln!(file, "0\nENDSEC")
}

fn write_layer(file: &mut fs::File, name: &str, color: u8) -> io::Result<()> {
    writeln!(file, "0\nLAYER\n2\n{name}\n70\n0\n62\n{color}\n6\nCONTINUOUS")
}

fn write_line(file: &mut fs::File, layer: &str, p1: (f64, f64), p2: (f64, f64)) -> io::Result<()> {
    writeln!(
        file,
        "0\nLINE\n8\n{layer}\n10\n{:.3}\n20\n{:.3}\n11\n{:.3}\n21\n{:.3}",
        p1.0, p1.1, p2.0, p2.1
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_endpoints_flip_the_vertical_axis() {
        let (p1, p2) = axis_endpoints(Orientation::Horizontal, 100.0, 0.0, 250.0);
        assert_eq!(p1, (0.0, -100.0));
        assert_eq!(p2, (250.0, -100.0));

        let (p1, p2) = axis_endpoints(Orientation::Vertical, 40.0, 10.0, 300.0);
        assert_eq!(p1, (40.0, -10.0));
        assert_eq!(p2, (40.0, -300.0));
    }
}
