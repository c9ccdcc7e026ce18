//! Synthesized `pom.xml` listing every identified package as a dependency.
//!
//! The generated project can be handed to other Maven tooling (for example
//! `snyk test --file=pom.xml`). Each source archive is recorded as an XML
//! comment above its dependencies.

use crate::model::ArchiveAnalysisResult;
use anyhow::{Context, Result};
use chrono::Utc;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::path::Path;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";

pub fn render_pom(results: &[ArchiveAnalysisResult]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_comment(
        &mut writer,
        &format!(
            "Generated by jarscan {} on {}",
            env!("CARGO_PKG_VERSION"),
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ),
    )?;

    writer.write_event(Event::Start(BytesStart::new("project").with_attributes([
        ("xmlns", POM_NAMESPACE),
        ("xmlns:xsi", XSI_NAMESPACE),
        ("xsi:schemaLocation", POM_SCHEMA_LOCATION),
    ])))?;

    write_text_element(&mut writer, "modelVersion", "4.0.0")?;
    write_text_element(&mut writer, "groupId", "jarscan")?;
    write_text_element(&mut writer, "artifactId", "jarscan-identified-dependencies")?;
    write_text_element(&mut writer, "version", "1.0.0")?;
    write_text_element(&mut writer, "packaging", "pom")?;

    writer.write_event(Event::Start(BytesStart::new("dependencies")))?;
    for result in results {
        if result.is_identified() {
            write_comment(&mut writer, &result.jar)?;
        } else {
            write_comment(&mut writer, &format!("{}: no package identified", result.jar))?;
        }

        for package in &result.matching_packages {
            let coordinate = &package.coordinate;
            writer.write_event(Event::Start(BytesStart::new("dependency")))?;
            write_text_element(&mut writer, "groupId", coordinate.group_id())?;
            write_text_element(&mut writer, "artifactId", coordinate.artifact_id())?;
            write_text_element(&mut writer, "version", coordinate.version())?;
            writer.write_event(Event::End(BytesEnd::new("dependency")))?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new("dependencies")))?;
    writer.write_event(Event::End(BytesEnd::new("project")))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

pub fn write_pom(results: &[ArchiveAnalysisResult], path: &Path) -> Result<()> {
    let xml = render_pom(results)?;
    fs::write(path, xml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_comment(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    let text = format!(" {} ", comment_safe(text));
    writer.write_event(Event::Comment(BytesText::from_escaped(text)))?;
    Ok(())
}

/// `--` is not allowed inside XML comments, so every dash that follows
/// another dash is separated from it by a space.
fn comment_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_dash = false;
    for c in text.chars() {
        if c == '-' && prev_dash {
            out.push(' ');
        }
        prev_dash = c == '-';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identify::parse_pom;
    use crate::model::{IdentificationMethod, PackageCoordinate, PackageReport};

    fn result(jar: &str, coordinates: &[(&str, &str, &str)]) -> ArchiveAnalysisResult {
        let method = if coordinates.is_empty() {
            None
        } else {
            Some(IdentificationMethod::Checksum)
        };
        let mut result = ArchiveAnalysisResult::new(Path::new(jar), method);
        for (g, a, v) in coordinates {
            result
                .matching_packages
                .push(PackageReport::unscanned(PackageCoordinate::new(*g, *a, *v)));
        }
        result
    }

    #[test]
    fn test_render_pom_lists_dependencies_with_comments() {
        let results = vec![
            result("lib/commons-io-2.11.0.jar", &[("commons-io", "commons-io", "2.11.0")]),
            result(
                "lib/shaded--app.jar",
                &[("org.example", "app", "3.0"), ("org.shaded", "dep", "1.1")],
            ),
            result("lib/mystery.jar", &[]),
        ];

        let xml = render_pom(&results).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<!-- lib/commons-io-2.11.0.jar -->"));
        assert!(xml.contains("<!-- lib/shaded- -app.jar -->"));
        assert!(xml.contains("<!-- lib/mystery.jar: no package identified -->"));
        assert_eq!(xml.matches("<dependency>").count(), 3);
        assert!(xml.contains("<artifactId>commons-io</artifactId>"));
        assert!(xml.contains("<version>1.1</version>"));
    }

    #[test]
    fn test_rendered_pom_is_well_formed() {
        let results = vec![result("a&b-1.0.jar", &[("org.example", "a&b", "1.0")])];
        let xml = render_pom(&results).unwrap();

        assert!(xml.contains("<artifactId>a&amp;b</artifactId>"));
        // The project's own coordinates parse back out
        let project = parse_pom(&xml).unwrap();
        assert_eq!(project.group_id(), "jarscan");
        assert_eq!(project.artifact_id(), "jarscan-identified-dependencies");
    }

    #[test]
    fn test_comment_never_contains_double_dash() {
        assert_eq!(comment_safe("a---b"), "a- - -b");
        assert_eq!(comment_safe("plain-name-1.0.jar"), "plain-name-1.0.jar");
        assert_eq!(comment_safe("--"), "- -");

        let xml = render_pom(&[result("lib/a---b.jar", &[])]).unwrap();
        assert!(xml.contains("<!-- lib/a- - -b.jar: no package identified -->"));
        for comment in xml.split("<!--").skip(1) {
            let body = comment.split("-->").next().unwrap();
            assert!(!body.contains("--"), "comment body {:?}", body);
        }
    }
}
