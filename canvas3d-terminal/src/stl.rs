/// STL loader for binary and ASCII files
///
/// Every facet becomes one triangular face carrying the facet normal, or a
/// normal derived from the vertex winding when the stored one is zero.
use canvas3d_core::{Color, Face};
use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::double,
    sequence::preceded,
    IResult,
};
use thiserror::Error;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum StlError {
    #[error("file too small to be a valid STL ({0} bytes)")]
    TooShort(usize),
    #[error("unexpected end of file in triangle {index}")]
    Truncated { index: usize },
    #[error("failed to parse ASCII STL: {0}")]
    Ascii(String),
}

fn facet_face(normal: Vector3<f64>, verts: [Point3<f64>; 3], color: &Color) -> Face {
    let face = Face::new(verts.to_vec(), color.clone());
    match normal.try_normalize(1e-12) {
        Some(unit) => face.with_normal(unit),
        None => face.with_derived_normal(),
    }
}

fn read_f32(data: &[u8], offset: usize) -> f64 {
    f32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]) as f64
}

fn read_vector(data: &[u8], offset: usize) -> Vector3<f64> {
    Vector3::new(
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    )
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8], color: &Color) -> Result<Vec<Face>, StlError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(StlError::TooShort(data.len()));
    }

    // Skip 80-byte header
    let data = &data[HEADER_LEN..];

    // Triangle count (4 bytes, little-endian)
    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

    let mut faces = Vec::with_capacity(triangle_count.min(data.len() / FACET_LEN));
    let mut offset = 4;

    for index in 0..triangle_count {
        if offset + FACET_LEN > data.len() {
            return Err(StlError::Truncated { index });
        }

        let normal = read_vector(data, offset);
        let verts = [
            Point3::from(read_vector(data, offset + 12)),
            Point3::from(read_vector(data, offset + 24)),
            Point3::from(read_vector(data, offset + 36)),
        ];
        // Trailing 2-byte attribute count is ignored
        offset += FACET_LEN;

        faces.push(facet_face(normal, verts, color));
    }

    Ok(faces)
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str, color: &Color) -> Result<Vec<Face>, StlError> {
    match parse_solid(input) {
        Ok((_, facets)) => Ok(facets
            .into_iter()
            .map(|(normal, verts)| facet_face(normal, verts, color))
            .collect()),
        Err(e) => Err(StlError::Ascii(e.to_string())),
    }
}

type Facet = (Vector3<f64>, [Point3<f64>; 3]);

fn parse_solid(input: &str) -> IResult<&str, Vec<Facet>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = not_line_ending(input)?; // Optional name
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, facets))
}

fn parse_facet(input: &str) -> IResult<&str, Facet> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, v3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, (normal, [v1, v2, v3])))
}

fn parse_vertex(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    let (input, v) = parse_vector3(input)?;
    Ok((input, Point3::from(v)))
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3<f64>> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8], color: &Color) -> Result<Vec<Face>, StlError> {
    // Binary files may also start with "solid", so fall back on failure
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(faces) = parse_ascii_stl(text, color) {
                return Ok(faces);
            }
        }
    }

    parse_binary_stl(data, color)
}
