use crate::error::{Error, Result};
use crate::model::{IdentificationMethod, PackageCoordinate};
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Entry names ending in this are treated as build descriptors.
const POM_SUFFIX: &str = "pom.xml";

/// Identifies an archive from the `pom.xml` files packed inside it.
///
/// Fat jars may embed several descriptors; every valid one contributes.
pub struct EmbeddedPomInspection;

#[async_trait]
impl super::IdentificationStrategy for EmbeddedPomInspection {
    fn method(&self) -> IdentificationMethod {
        IdentificationMethod::EmbeddedPom
    }

    async fn identify(&self, archive: &Path) -> Result<Vec<PackageCoordinate>> {
        match read_embedded_poms(archive) {
            Ok(found) => Ok(found),
            Err(e) => {
                warn!("Could not unzip {}: {}", archive.display(), e);
                Ok(Vec::new())
            }
        }
    }
}

/// Opens the archive and parses each embedded descriptor.
///
/// Errors are returned only for the archive itself; a bad descriptor is
/// logged and skipped.
fn read_embedded_poms(archive: &Path) -> Result<Vec<PackageCoordinate>> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut found = Vec::new();

    for i in 0..zip.len() {
        // Names come from the central directory; only descriptors get decompressed
        let name = {
            let entry = zip.by_index_raw(i)?;
            if entry.is_dir() || !entry.name().ends_with(POM_SUFFIX) {
                continue;
            }
            entry.name().to_string()
        };
        debug!("Found {} in {}", name, archive.display());

        let mut content = String::new();
        let read = zip
            .by_index(i)
            .map_err(Error::from)
            .and_then(|mut entry| Ok(entry.read_to_string(&mut content)?));
        if let Err(e) = read {
            warn!("Could not read {} in {}: {}", name, archive.display(), e);
            continue;
        }

        match parse_pom(&content) {
            Ok(coordinate) => {
                info!("Found pom.xml with {}", coordinate);
                found.push(coordinate);
            }
            Err(e) => {
                warn!("Skipping {} in {}: {}", name, archive.display(), e);
            }
        }
    }

    Ok(found)
}

/// Reads the `groupId`, `artifactId` and `version` declared directly under
/// the root `<project>` element.
///
/// Values inherited from `<parent>` are not considered.
pub fn parse_pom(content: &str) -> Result<PackageCoordinate> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();

    let mut group_id = None;
    let mut artifact_id = None;
    let mut version = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Text(ref e) => {
                if path.len() == 2 && path[0] == "project" {
                    let text = e.unescape()?.into_owned();
                    match path[1].as_str() {
                        "groupId" => group_id = Some(text),
                        "artifactId" => artifact_id = Some(text),
                        "version" => version = Some(text),
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let group_id = group_id.ok_or(Error::IncompletePom("groupId"))?;
    let artifact_id = artifact_id.ok_or(Error::IncompletePom("artifactId"))?;
    let version = version.ok_or(Error::IncompletePom("version"))?;

    Ok(PackageCoordinate::new(group_id, artifact_id, version))
}
