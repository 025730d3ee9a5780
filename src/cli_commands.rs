use anyhow::{Context, Result};
use clap::ValueEnum;
use geodaisy::{GeoInput, GeoInterface, GeoObject, GeometricObject, Geometry};
use std::fs::File;
use std::io::{self, Read, Write};

/// Representation produced by the convert command
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Wkt,
    Geojson,
    GeoInterface,
}

// '-' reads the geometry from standard input
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read standard input")?;
        Ok(buf)
    } else {
        Ok(input.to_string())
    }
}

fn parse_input(input: &str) -> Result<GeoObject> {
    let text = read_input(input)?;
    GeoObject::new(GeoInput::Text(text.trim())).context("Failed to parse geometry")
}

/// Parse the input, convert it and either print it or save it to a file
pub fn convert(input: &str, to: OutputFormat, output_path: Option<&str>) -> Result<()> {
    let obj = parse_input(input)?;
    let converted = match to {
        OutputFormat::Wkt => obj.wkt(),
        OutputFormat::Geojson => obj.geojson(),
        OutputFormat::GeoInterface => {
            let record = obj
                .geo_interface()
                .context("Geometry has no geo interface record")?;
            serde_json::to_string_pretty(&record)?
        }
    };
    log::info!("Converted {} geometry to {to:?}", obj.geometry_type());

    match output_path {
        None => {
            println!("{converted}");
            Ok(())
        }
        Some(fp) => {
            let mut file =
                File::create(fp).with_context(|| format!("Failed to create file '{fp}'"))?;
            file.write_all(converted.as_bytes())
                .with_context(|| format!("Failed to write to file '{fp}'"))?;
            println!("Geometry saved to file: '{fp}'");
            Ok(())
        }
    }
}

/// Parse an input string and print some details about the shape
pub fn show_detail(input: &str) -> Result<()> {
    let obj = parse_input(input)?;
    let tree = obj.geometry().to_tree();

    println!("Parsed a Geometry of Type {}!", obj.geometry_type());
    println!("Nesting depth of the coordinates: {}", tree.depth());
    println!("The geometry contains {} total coordinate pairs.", tree.total_pairs());
    match obj.geometry() {
        Geometry::Polygon(rings) => {
            println!("The polygon has {} holes.", rings.len().saturating_sub(1));
        }
        Geometry::MultiPolygon(polys) => {
            let holes: usize = polys.iter().map(|p| p.len().saturating_sub(1)).sum();
            println!("The multipolygon has {} parts and {holes} holes.", polys.len());
        }
        Geometry::MultiLineString(lines) => {
            println!("The multilinestring has {} lines.", lines.len());
        }
        _ => (),
    }
    println!("WKT: {obj}");
    Ok(())
}
