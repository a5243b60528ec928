use roxmltree::Node;
use thiserror::Error;

use geom::LonLat;

pub const GML_NS: &str = "http://www.opengis.net/gml";
pub const USMIN_NS: &str = "http://mrdata.usgs.gov/usmin";

/// The whole response couldn't be read. Individual bad features never produce this.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response isn't UTF-8")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("response isn't well-formed XML")]
    Malformed(#[from] roxmltree::Error),
    /// The service answered with an OGC exception report instead of features.
    #[error("WFS service error: {0}")]
    ServiceException(String),
}

/// One mine location.
#[derive(Clone, Debug, PartialEq)]
pub struct PointRecord {
    pub pos: LonLat,
    pub attributes: MineAttributes,
}

impl PointRecord {
    pub fn latitude(&self) -> f64 {
        self.pos.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.pos.longitude
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MineAttributes {
    pub name: String,
    /// From `usmin:type`
    pub category: String,
    /// From `usmin:state`
    pub region: String,
}

/// What to fill in when a feature doesn't say. The region fallback is a fixed code, regardless of
/// where the bounding box actually is.
#[derive(Clone, Debug)]
pub struct AttributeDefaults {
    pub name: String,
    pub category: String,
    pub region: String,
}

impl Default for AttributeDefaults {
    fn default() -> AttributeDefaults {
        AttributeDefaults {
            name: "Unknown".to_string(),
            category: "Unknown".to_string(),
            region: "CA".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// No `gml:pos` at all; there's nothing to put on a map.
    MissingPosition,
    /// A `gml:pos` that isn't exactly two numbers. Holds the raw text, if there was any.
    MalformedPosition(Option<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkippedFeature {
    /// Position among all `usmin:points` features in the response, starting at 0
    pub index: usize,
    pub reason: SkipReason,
}

/// Everything usable from one response, plus what was left out.
#[derive(Clone, Debug, Default)]
pub struct FeatureBatch {
    pub records: Vec<PointRecord>,
    pub skipped: Vec<SkippedFeature>,
}

/// Extracts every `usmin:points` feature from a GetFeature response, in document order. Features
/// without a usable position are skipped and reported in the batch. A response that isn't XML, or
/// is an exception report, is an error. An empty body just means no features.
pub fn parse(raw: &[u8], defaults: &AttributeDefaults) -> Result<FeatureBatch, ParseError> {
    let raw_string = std::str::from_utf8(raw)?;
    if raw_string.trim().is_empty() {
        return Ok(FeatureBatch::default());
    }
    let tree = roxmltree::Document::parse(raw_string)?;
    check_service_exception(tree.root_element())?;

    let mut batch = FeatureBatch::default();
    let features = tree
        .root_element()
        .descendants()
        .skip(1)
        .filter(|n| is(n, USMIN_NS, "points"));
    for (index, feature) in features.enumerate() {
        match parse_feature(feature, defaults) {
            Ok(record) => batch.records.push(record),
            Err(reason) => {
                match reason {
                    SkipReason::MissingPosition => {
                        debug!("Feature {} has no gml:pos, skipping", index)
                    }
                    SkipReason::MalformedPosition(ref txt) => {
                        warn!("Error processing feature {}: bad gml:pos {:?}", index, txt)
                    }
                }
                batch.skipped.push(SkippedFeature { index, reason });
            }
        }
    }
    Ok(batch)
}

// WFS servers report bad requests as a 200 with a ServiceExceptionReport (1.0/1.1) or an
// ExceptionReport (OWS 1.1) body.
fn check_service_exception(root: Node) -> Result<(), ParseError> {
    let name = root.tag_name().name();
    if name != "ServiceExceptionReport" && name != "ExceptionReport" {
        return Ok(());
    }
    let messages: Vec<String> = root
        .descendants()
        .filter(|n| {
            n.is_element()
                && matches!(n.tag_name().name(), "ServiceException" | "ExceptionText")
        })
        .filter_map(|n| n.text())
        .map(|txt| txt.trim().to_string())
        .filter(|txt| !txt.is_empty())
        .collect();
    if messages.is_empty() {
        Err(ParseError::ServiceException(format!("{} with no message", name)))
    } else {
        Err(ParseError::ServiceException(messages.join("; ")))
    }
}

fn parse_feature(feature: Node, defaults: &AttributeDefaults) -> Result<PointRecord, SkipReason> {
    let pos = find(feature, GML_NS, "pos").ok_or(SkipReason::MissingPosition)?;
    let txt = pos.text();
    let pt = txt
        .and_then(parse_pos)
        .ok_or_else(|| SkipReason::MalformedPosition(txt.map(|x| x.to_string())))?;

    let text_or = |tag: &str, default: &str| {
        find(feature, USMIN_NS, tag)
            .and_then(|n| n.text())
            .unwrap_or(default)
            .to_string()
    };
    Ok(PointRecord {
        pos: pt,
        attributes: MineAttributes {
            name: text_or("name", &defaults.name),
            category: text_or("type", &defaults.category),
            region: text_or("state", &defaults.region),
        },
    })
}

// gml:pos in EPSG:4326 is "lat lon"
fn parse_pos(input: &str) -> Option<LonLat> {
    let coords: Vec<&str> = input.split_whitespace().collect();
    if coords.len() != 2 {
        return None;
    }
    match (coords[0].parse::<f64>(), coords[1].parse::<f64>()) {
        (Ok(lat), Ok(lon)) => Some(LonLat::new(lon, lat)),
        _ => None,
    }
}

fn is(node: &Node, namespace: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(namespace)
}

/// The first element strictly below `node` with this name.
fn find<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| is(n, namespace, name))
}
