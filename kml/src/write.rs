use std::io::Write;
use std::path::Path;

use quick_xml::escape::escape;

use crate::MarkerDocument;

impl MarkerDocument {
    /// Serializes the whole document. The output only depends on the document, so identical
    /// documents always produce identical bytes.
    pub fn write_kml<W: Write>(&self, f: &mut W) -> std::io::Result<()> {
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(f, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
        writeln!(f, r#"    <Document>"#)?;
        writeln!(f, r#"        <Folder>"#)?;
        writeln!(f, r#"            <name>{}</name>"#, escape(&self.folder_name))?;
        for m in &self.markers {
            writeln!(f, r#"            <Placemark>"#)?;
            writeln!(f, r#"                <name>{}</name>"#, escape(&m.name))?;
            writeln!(
                f,
                r#"                <description>{}</description>"#,
                escape(&m.description)
            )?;
            writeln!(f, r#"                <Style>"#)?;
            writeln!(f, r#"                    <IconStyle>"#)?;
            writeln!(
                f,
                r#"                        <scale>{:.1}</scale>"#,
                m.style.scale
            )?;
            writeln!(f, r#"                        <Icon>"#)?;
            writeln!(
                f,
                r#"                            <href>{}</href>"#,
                escape(&m.style.href)
            )?;
            writeln!(f, r#"                        </Icon>"#)?;
            writeln!(f, r#"                    </IconStyle>"#)?;
            writeln!(f, r#"                </Style>"#)?;
            writeln!(f, r#"                <Point>"#)?;
            writeln!(
                f,
                r#"                    <coordinates>{:?},{:?}</coordinates>"#,
                m.pos.x(),
                m.pos.y()
            )?;
            writeln!(f, r#"                </Point>"#)?;
            writeln!(f, r#"            </Placemark>"#)?;
        }
        writeln!(f, r#"        </Folder>"#)?;
        writeln!(f, r#"    </Document>"#)?;
        writeln!(f, r#"</kml>"#)?;
        Ok(())
    }

    pub fn to_kml_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing to a Vec can't fail
        if let Err(err) = self.write_kml(&mut out) {
            error!("Serializing KML to memory failed: {}", err);
        }
        out
    }
}

/// Writes the document to `path`, replacing whatever is there. Fails if the directory doesn't
/// exist or isn't writable.
pub fn write<P: AsRef<Path>>(doc: &MarkerDocument, path: P) -> std::io::Result<()> {
    let path = path.as_ref();
    info!(
        "Writing {} placemarks to {}",
        doc.markers.len(),
        path.display()
    );
    digio::write_atomically(path, &doc.to_kml_bytes())
}
