//! Wavefront OBJ parsing
//!
//! Reads the subset of OBJ needed for a textured, lit triangle mesh: `v`, `vt`,
//! `vn` and triangular `f` statements whose corners carry all three indices
//! (`v/vt/vn`). Everything else (groups, smoothing, materials, comments) is
//! ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use objview_math::{Vec2, Vec3};

use crate::AssetError;

/// One face corner, as zero-based indices into the [`ObjData`] lists
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub tex_coord: usize,
    pub normal: usize,
}

/// A triangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub corners: [FaceVertex; 3],
}

/// Indexed contents of an OBJ file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjData {
    pub positions: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    /// Unit-length vertex normals
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl ObjData {
    /// Open and parse an OBJ file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let file = File::open(path.as_ref())?;
        let data = Self::parse(BufReader::new(file))?;
        log::debug!(
            "Parsed {}: {} positions, {} tex coords, {} normals, {} faces",
            path.as_ref().display(),
            data.positions.len(),
            data.tex_coords.len(),
            data.normals.len(),
            data.faces.len()
        );
        Ok(data)
    }

    /// Parse OBJ text held in memory
    pub fn parse_str(source: &str) -> Result<Self, AssetError> {
        Self::parse(source.as_bytes())
    }

    /// Parse OBJ text line by line
    ///
    /// Bytes that are not valid UTF-8 (Latin-1 comments from some exporters)
    /// are replaced rather than rejected.
    pub fn parse<R: BufRead>(mut reader: R) -> Result<Self, AssetError> {
        let mut data = Self::default();
        let mut raw = Vec::new();
        let mut line_number = 0;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            line_number += 1;
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim();
            if line.chars().count() < 3 {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens[0] {
                "v" => match tokens.len() {
                    4 | 5 => {
                        let position = Vec3::new(
                            parse_float(tokens[1], line_number)?,
                            parse_float(tokens[2], line_number)?,
                            parse_float(tokens[3], line_number)?,
                        );
                        data.positions.push(position);
                    }
                    n => skip_line(line_number, "v", n),
                },
                "vt" => match tokens.len() {
                    3 | 4 => {
                        let uv = Vec2::new(
                            parse_float(tokens[1], line_number)?,
                            parse_float(tokens[2], line_number)?,
                        );
                        data.tex_coords.push(uv);
                    }
                    n => skip_line(line_number, "vt", n),
                },
                "vn" => match tokens.len() {
                    4 => {
                        let normal = Vec3::new(
                            parse_float(tokens[1], line_number)?,
                            parse_float(tokens[2], line_number)?,
                            parse_float(tokens[3], line_number)?,
                        );
                        data.normals.push(normal.normalized());
                    }
                    n => skip_line(line_number, "vn", n),
                },
                "f" => match tokens.len() {
                    4 => {
                        let face = Face {
                            corners: [
                                data.parse_corner(tokens[1], line_number)?,
                                data.parse_corner(tokens[2], line_number)?,
                                data.parse_corner(tokens[3], line_number)?,
                            ],
                        };
                        data.faces.push(face);
                    }
                    n => skip_line(line_number, "f", n),
                },
                keyword if keyword.starts_with('#') => {}
                keyword => {
                    log::trace!("Ignoring OBJ statement '{}' on line {}", keyword, line_number);
                }
            }
        }

        Ok(data)
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Parse a `v/vt/vn` corner against the lists read so far
    fn parse_corner(&self, token: &str, line: usize) -> Result<FaceVertex, AssetError> {
        let parts: Vec<&str> = token.split('/').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(AssetError::Parse {
                line,
                message: format!("face corner '{}' is not of the form v/vt/vn", token),
            });
        }

        Ok(FaceVertex {
            position: resolve_index(parts[0], self.positions.len(), "position", line)?,
            tex_coord: resolve_index(parts[1], self.tex_coords.len(), "texture coordinate", line)?,
            normal: resolve_index(parts[2], self.normals.len(), "normal", line)?,
        })
    }
}

fn parse_float(token: &str, line: usize) -> Result<f32, AssetError> {
    token.parse().map_err(|_| AssetError::Parse {
        line,
        message: format!("invalid number '{}'", token),
    })
}

/// Turn a 1-based (or negative, end-relative) OBJ index into a zero-based one
///
/// Positive indices are not bounds-checked here; that happens when the mesh
/// is built, once every list is complete.
fn resolve_index(
    token: &str,
    len: usize,
    kind: &'static str,
    line: usize,
) -> Result<usize, AssetError> {
    let index: i64 = token.parse().map_err(|_| AssetError::Parse {
        line,
        message: format!("invalid {} index '{}'", kind, token),
    })?;

    match index {
        0 => Err(AssetError::Parse {
            line,
            message: format!("{} index 0 is not valid (indices start at 1)", kind),
        }),
        i if i > 0 => Ok((i - 1) as usize),
        i => {
            let back = i.unsigned_abs() as usize;
            len.checked_sub(back)
                .ok_or(AssetError::IndexOutOfRange { kind, index: back, len })
        }
    }
}

fn skip_line(line: usize, keyword: &str, token_count: usize) {
    log::warn!(
        "Skipping OBJ line {}: '{}' with {} tokens is not supported",
        line,
        keyword,
        token_count
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# one triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vn 0.0 0.0 2.0
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn test_parse_triangle() {
        let obj = ObjData::parse_str(TRIANGLE).unwrap();
        assert_eq!(obj.positions.len(), 3);
        assert_eq!(obj.tex_coords.len(), 3);
        assert_eq!(obj.normals.len(), 1);
        assert_eq!(obj.triangle_count(), 1);

        let face = obj.faces[0];
        assert_eq!(face.corners[0], FaceVertex { position: 0, tex_coord: 0, normal: 0 });
        assert_eq!(face.corners[2], FaceVertex { position: 2, tex_coord: 2, normal: 0 });
        assert_eq!(obj.positions[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(obj.tex_coords[2], Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_normals_are_normalized() {
        let obj = ObjData::parse_str(TRIANGLE).unwrap();
        assert_eq!(obj.normals[0], Vec3::Z);
    }

    #[test]
    fn test_optional_w_components_ignored() {
        let obj = ObjData::parse_str("v 1 2 3 1\nvt 0.5 0.25 0\n").unwrap();
        assert_eq!(obj.positions, vec![Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(obj.tex_coords, vec![Vec2::new(0.5, 0.25)]);
    }

    #[test]
    fn test_unknown_statements_ignored() {
        let source = "mtllib box.mtl\no Box\ng side\ns off\nusemtl crate\n# comment\n\n";
        let obj = ObjData::parse_str(&format!("{}{}", source, TRIANGLE)).unwrap();
        assert_eq!(obj.triangle_count(), 1);
    }

    #[test]
    fn test_extra_whitespace_tolerated() {
        let obj = ObjData::parse_str("v   1.0\t2.0  3.0   \r\n").unwrap();
        assert_eq!(obj.positions, vec![Vec3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_wrong_token_counts_skipped() {
        let source = "v 1 2\nvt 1\nvn 1 0\nf 1/1/1 2/2/2 3/3/3 4/4/4\n";
        let obj = ObjData::parse_str(source).unwrap();
        assert!(obj.positions.is_empty());
        assert!(obj.tex_coords.is_empty());
        assert!(obj.normals.is_empty());
        assert!(obj.faces.is_empty());
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let source = TRIANGLE.replace("f 1/1/1 2/2/1 3/3/1", "f -3/-3/-1 -2/-2/-1 -1/-1/-1");
        let obj = ObjData::parse_str(&source).unwrap();
        assert_eq!(obj.faces[0], ObjData::parse_str(TRIANGLE).unwrap().faces[0]);
    }

    #[test]
    fn test_negative_index_before_start() {
        let source = "v 0 0 0\nvt 0 0\nvn 0 0 1\nf -2/1/1 1/1/1 1/1/1\n";
        match ObjData::parse_str(source) {
            Err(AssetError::IndexOutOfRange { kind, index, len }) => {
                assert_eq!(kind, "position");
                assert_eq!(index, 2);
                assert_eq!(len, 1);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_index_is_error() {
        let source = TRIANGLE.replace("f 1/1/1", "f 0/1/1");
        match ObjData::parse_str(&source) {
            Err(AssetError::Parse { line, .. }) => assert_eq!(line, 9),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_corner_index_is_error() {
        let source = TRIANGLE.replace("f 1/1/1 2/2/1 3/3/1", "f 1//1 2//1 3//1");
        assert!(matches!(
            ObjData::parse_str(&source),
            Err(AssetError::Parse { .. })
        ));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let source = "v 0 0 0\nv 1 zero 0\n";
        match ObjData::parse_str(source) {
            Err(AssetError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("zero"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_utf8_comment_tolerated() {
        let mut source = b"# exported by Caf\xE9\n".to_vec();
        source.extend_from_slice(TRIANGLE.as_bytes());
        let obj = ObjData::parse(source.as_slice()).unwrap();
        assert_eq!(obj.triangle_count(), 1);
        assert_eq!(obj.positions.len(), 3);
    }

    #[test]
    fn test_line_numbers_count_crlf_lines() {
        let source = "v 0 0 0\r\nv 1 0 0\r\nv x 1 0\r\n";
        match ObjData::parse_str(source) {
            Err(AssetError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ObjData::load("/nonexistent/model.obj"),
            Err(AssetError::Io(_))
        ));
    }
}
