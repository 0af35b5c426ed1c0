//! XML Descriptor Loader Module
//! Scans a directory for constellation descriptors and extracts star fields.
//!
//! Observed file shape (one star per file):
//!
//! ```xml
//! <system>
//!   <name>Betelgeuse</name>
//!   <rightascension>5 55 10.3</rightascension>
//!   <declination>7 24 25</declination>
//!   <distance>548</distance>
//! </system>
//! ```
//!
//! Files may also list several `<star>` children carrying the same four fields.
//! A `<star>` child with none of the coordinate fields holds other data (mass,
//! planets) and is ignored. Repeated `<name>` elements list alternate names;
//! the first one is the display name.

use crate::coords::{CoordError, Declination, RightAscension};
use crate::data::{Constellation, ConstellationDescriptor, StarRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed XML in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },
    #[error("No <{field}> tag found")]
    MissingField { field: &'static str },
    #[error("Distance of {star} is not a non-negative number: {value:?}")]
    InvalidDistance { star: String, value: String },
    #[error("Invalid {field} for {star}: {source}")]
    InvalidAngle {
        star: String,
        field: &'static str,
        #[source]
        source: CoordError,
    },
}

/// A file left out of the constellation list, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of scanning one directory.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub descriptors: Vec<ConstellationDescriptor>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Default, Deserialize)]
struct NameXml {
    #[serde(default)]
    name: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StarXml {
    #[serde(default)]
    name: Vec<String>,
    rightascension: Option<String>,
    declination: Option<String>,
    distance: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConstellationXml {
    #[serde(default)]
    name: Vec<String>,
    rightascension: Option<String>,
    declination: Option<String>,
    distance: Option<String>,
    #[serde(default, rename = "star")]
    stars: Vec<StarXml>,
}

/// Holds the directory being browsed and the descriptors found in it.
pub struct ConstellationLoader {
    directory: PathBuf,
    report: ScanReport,
}

impl ConstellationLoader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            report: ScanReport::default(),
        }
    }

    /// Rescan the current directory.
    pub fn scan(&mut self) -> Result<&ScanReport, LoaderError> {
        self.report = ScanReport::default();
        self.report = Self::scan_directory_report(&self.directory)?;
        Ok(&self.report)
    }

    /// Switch to another directory and scan it.
    pub fn set_directory(
        &mut self,
        directory: impl Into<PathBuf>,
    ) -> Result<&ScanReport, LoaderError> {
        self.directory = directory.into();
        self.scan()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn descriptors(&self) -> &[ConstellationDescriptor] {
        &self.report.descriptors
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.report.skipped
    }

    /// Descriptors for every `.xml` file in `dir` that carries a `<name>`.
    pub fn scan_directory(dir: &Path) -> Result<Vec<ConstellationDescriptor>, LoaderError> {
        Self::scan_directory_report(dir).map(|report| report.descriptors)
    }

    /// Like [`Self::scan_directory`], also listing the files that were skipped.
    pub fn scan_directory_report(dir: &Path) -> Result<ScanReport, LoaderError> {
        let entries = fs::read_dir(dir).map_err(|source| LoaderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut report = ScanReport::default();

        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            if !path.is_file() || !Self::is_xml(&path) {
                continue;
            }

            match Self::read_name(&path) {
                Ok(name) => {
                    tracing::debug!(path = %path.display(), %name, "Found constellation");
                    report.descriptors.push(ConstellationDescriptor { name, path });
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping descriptor");
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
            .descriptors
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));

        tracing::info!(
            dir = %dir.display(),
            found = report.descriptors.len(),
            skipped = report.skipped.len(),
            "Scanned constellation directory"
        );

        Ok(report)
    }

    fn is_xml(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("xml"))
            .unwrap_or(false)
    }

    fn read_xml<T: DeserializeOwned>(path: &Path) -> Result<T, LoaderError> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        quick_xml::de::from_str(&text).map_err(|source| LoaderError::Xml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Display name from the root `<name>` element.
    pub fn read_name(path: &Path) -> Result<String, LoaderError> {
        let doc: NameXml = Self::read_xml(path)?;
        first_name(doc.name).ok_or(LoaderError::MissingField { field: "name" })
    }

    /// Open a descriptor file and extract all of its stars.
    pub fn load_constellation(path: &Path) -> Result<Constellation, LoaderError> {
        let doc: ConstellationXml = Self::read_xml(path)?;
        let name = first_name(doc.name).ok_or(LoaderError::MissingField { field: "name" })?;

        let mut stars = Vec::new();

        let has_root_star =
            doc.rightascension.is_some() || doc.declination.is_some() || doc.distance.is_some();
        if has_root_star {
            stars.push(Self::build_star(
                name.clone(),
                doc.rightascension,
                doc.declination,
                doc.distance,
            )?);
        }

        for (i, star) in doc.stars.into_iter().enumerate() {
            let star_name = first_name(star.name).unwrap_or_else(|| format!("{} #{}", name, i + 1));

            let has_coordinates = star.rightascension.is_some()
                || star.declination.is_some()
                || star.distance.is_some();
            if !has_coordinates {
                tracing::debug!(path = %path.display(), star = %star_name, "Ignoring <star> without coordinates");
                continue;
            }

            stars.push(Self::build_star(
                star_name,
                star.rightascension,
                star.declination,
                star.distance,
            )?);
        }

        if stars.is_empty() {
            return Err(LoaderError::MissingField {
                field: "rightascension",
            });
        }

        tracing::info!(path = %path.display(), %name, stars = stars.len(), "Loaded constellation");

        Ok(Constellation {
            name,
            path: path.to_path_buf(),
            stars,
        })
    }

    fn build_star(
        name: String,
        right_ascension: Option<String>,
        declination: Option<String>,
        distance: Option<String>,
    ) -> Result<StarRecord, LoaderError> {
        let right_ascension = non_empty(right_ascension).ok_or(LoaderError::MissingField {
            field: "rightascension",
        })?;
        let declination = non_empty(declination).ok_or(LoaderError::MissingField {
            field: "declination",
        })?;
        let distance_text =
            non_empty(distance).ok_or(LoaderError::MissingField { field: "distance" })?;

        RightAscension::parse(&right_ascension).map_err(|source| LoaderError::InvalidAngle {
            star: name.clone(),
            field: "rightascension",
            source,
        })?;
        Declination::parse(&declination).map_err(|source| LoaderError::InvalidAngle {
            star: name.clone(),
            field: "declination",
            source,
        })?;

        let distance = distance_text
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| LoaderError::InvalidDistance {
                star: name.clone(),
                value: distance_text.clone(),
            })?;

        Ok(StarRecord {
            name,
            right_ascension,
            declination,
            distance,
        })
    }
}

/// First non-blank entry of a repeated `<name>` element.
fn first_name(names: Vec<String>) -> Option<String> {
    names.into_iter().find_map(|n| non_empty(Some(n)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(file);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const BETELGEUSE: &str = "<system>\
        <name>Betelgeuse</name>\
        <rightascension>5 55 10.3</rightascension>\
        <declination>7 24 25</declination>\
        <distance>548</distance>\
        </system>";

    #[test]
    fn reads_name() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "b.xml", BETELGEUSE);
        assert_eq!(ConstellationLoader::read_name(&path).unwrap(), "Betelgeuse");
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "b.xml", "<system><name>   </name></system>");
        assert!(matches!(
            ConstellationLoader::read_name(&path),
            Err(LoaderError::MissingField { field: "name" })
        ));
    }

    #[test]
    fn loads_single_star_shape() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "b.xml", BETELGEUSE);
        let c = ConstellationLoader::load_constellation(&path).unwrap();
        assert_eq!(c.name, "Betelgeuse");
        assert_eq!(
            c.stars,
            vec![StarRecord {
                name: "Betelgeuse".to_string(),
                right_ascension: "5 55 10.3".to_string(),
                declination: "7 24 25".to_string(),
                distance: 548.0,
            }]
        );
    }

    #[test]
    fn loads_star_children_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "belt.xml",
            "<constellation>\
               <name>Orion's Belt</name>\
               <star><name>Alnitak</name><rightascension>5 40 45.5</rightascension>\
                 <declination>-1 56 34</declination><distance>1260</distance></star>\
               <star><name>Alnilam</name><rightascension>5 36 12.8</rightascension>\
                 <declination>-1 12 7</declination><distance>1340</distance></star>\
               <star><rightascension>5 32 0.4</rightascension>\
                 <declination>-0 17 57</declination><distance>1200</distance></star>\
             </constellation>",
        );
        let c = ConstellationLoader::load_constellation(&path).unwrap();
        let names: Vec<&str> = c.stars.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Alnitak", "Alnilam", "Orion's Belt #3"]);
    }

    #[test]
    fn missing_distance_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "x.xml",
            "<system><name>X</name><rightascension>1 0 0</rightascension>\
             <declination>0 0 0</declination></system>",
        );
        assert!(matches!(
            ConstellationLoader::load_constellation(&path),
            Err(LoaderError::MissingField { field: "distance" })
        ));
    }

    #[test]
    fn non_numeric_distance_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "x.xml",
            "<system><name>X</name><rightascension>1 0 0</rightascension>\
             <declination>0 0 0</declination><distance>far</distance></system>",
        );
        assert!(matches!(
            ConstellationLoader::load_constellation(&path),
            Err(LoaderError::InvalidDistance { .. })
        ));
    }

    #[test]
    fn negative_distance_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "x.xml",
            "<system><name>X</name><rightascension>1 0 0</rightascension>\
             <declination>0 0 0</declination><distance>-4</distance></system>",
        );
        assert!(matches!(
            ConstellationLoader::load_constellation(&path),
            Err(LoaderError::InvalidDistance { .. })
        ));
    }

    #[test]
    fn malformed_declination_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "x.xml",
            "<system><name>X</name><rightascension>1 0 0</rightascension>\
             <declination>12 30</declination><distance>4</distance></system>",
        );
        assert!(matches!(
            ConstellationLoader::load_constellation(&path),
            Err(LoaderError::InvalidAngle {
                field: "declination",
                ..
            })
        ));
    }

    #[test]
    fn name_only_file_has_no_stars() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "x.xml", "<system><name>Empty</name></system>");
        assert!(matches!(
            ConstellationLoader::load_constellation(&path),
            Err(LoaderError::MissingField {
                field: "rightascension"
            })
        ));
    }

    #[test]
    fn broken_xml_is_an_xml_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "x.xml", "<system><name>Oops</system>");
        assert!(matches!(
            ConstellationLoader::read_name(&path),
            Err(LoaderError::Xml { .. })
        ));
    }

    #[test]
    fn first_of_repeated_names_wins() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "com.xml",
            "<system><name>11 Com</name><name>HD 107383</name>\
             <rightascension>12 20 43</rightascension><declination>17 47 34</declination>\
             <distance>88.9</distance></system>",
        );
        assert_eq!(ConstellationLoader::read_name(&path).unwrap(), "11 Com");
        let c = ConstellationLoader::load_constellation(&path).unwrap();
        assert_eq!(c.name, "11 Com");
        assert_eq!(c.stars.len(), 1);
    }

    #[test]
    fn blank_first_name_falls_through_to_next() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "x.xml", "<system><name> </name><name>Alt</name></system>");
        assert_eq!(ConstellationLoader::read_name(&path).unwrap(), "Alt");
    }

    #[test]
    fn star_child_without_coordinates_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "com.xml",
            "<system><name>11 Com</name>\
             <rightascension>12 20 43</rightascension><declination>17 47 34</declination>\
             <distance errorminus=\"1.7\" errorplus=\"1.8\">88.9</distance>\
             <star><name>11 Com</name><name>HD 107383</name><mass>2.7</mass>\
               <planet><name>11 Com b</name><mass>19.4</mass></planet></star>\
             </system>",
        );
        let c = ConstellationLoader::load_constellation(&path).unwrap();
        assert_eq!(c.stars.len(), 1);
        assert_eq!(c.stars[0].name, "11 Com");
        assert_eq!(c.stars[0].distance, 88.9);
    }

    #[test]
    fn partially_filled_star_child_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "x.xml",
            "<system><name>X</name><rightascension>1 0 0</rightascension>\
             <declination>0 0 0</declination><distance>4</distance>\
             <star><name>Half</name><rightascension>2 0 0</rightascension></star></system>",
        );
        assert!(matches!(
            ConstellationLoader::load_constellation(&path),
            Err(LoaderError::MissingField {
                field: "declination"
            })
        ));
    }

    #[test]
    fn unknown_siblings_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "x.xml",
            "<system><catalog>HIP</catalog><name>Vega</name><magnitude>0.03</magnitude>\
             <rightascension>18 36 56.3</rightascension><spectraltype>A0V</spectraltype>\
             <declination>38 47 1</declination><distance>25</distance>\
             <videolink>none</videolink></system>",
        );
        assert_eq!(ConstellationLoader::read_name(&path).unwrap(), "Vega");
        let c = ConstellationLoader::load_constellation(&path).unwrap();
        assert_eq!(c.stars[0].declination, "38 47 1");
        assert_eq!(c.stars[0].distance, 25.0);
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(ConstellationLoader::is_xml(Path::new("a/ORION.XML")));
        assert!(ConstellationLoader::is_xml(Path::new("lyra.xml")));
        assert!(!ConstellationLoader::is_xml(Path::new("notes.txt")));
        assert!(!ConstellationLoader::is_xml(Path::new("xml")));
    }
}
