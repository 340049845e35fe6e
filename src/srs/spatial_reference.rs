//! The spatial reference object
//!
//! A [`SpatialReference`] owns an optional WKT tree and a cache of unit
//! normalization factors. All imports are staged: a new tree is built on
//! the side and only swapped in once it is complete, so a failed import
//! leaves the previous definition untouched.

use std::fmt;
use std::fs;
use std::path::Path;
use log::{debug, warn};

use crate::registry::Registry;
use crate::srs::constants::{datums, nodes, params, projections, units, UNKNOWN, UNNAMED};
use crate::srs::errors::{SrsError, SrsResult};
use crate::srs::norm::NormInfo;
use crate::srs::projection::{is_angular_parameter, is_linear_parameter, Projection, ProjectionKind};
use crate::srs::well_known;
use crate::utils::format_utils::{atof, atoi, format_number, nearly_equal};
use crate::wkt::WktNode;

/// Root keywords accepted by the WKT importer
const ACCEPTED_ROOTS: &[&str] = &[
    nodes::GEOGCS, nodes::PROJCS, nodes::LOCAL_CS, nodes::COMPD_CS, "GEOCCS", "VERT_CS",
];

/// Description of a geographic coordinate system
#[derive(Debug, Clone, PartialEq)]
pub struct GeogCsDef {
    pub name: String,
    pub datum: String,
    pub spheroid: String,
    pub semi_major: f64,
    pub inv_flattening: f64,
    pub prime_meridian: String,
    pub prime_meridian_offset: f64,
    pub angular_unit: String,
    /// Radians per angular unit
    pub angular_conv: f64,
}

impl GeogCsDef {
    /// A definition on the Greenwich meridian measured in degrees
    pub fn new(name: &str, datum: &str, spheroid: &str, semi_major: f64, inv_flattening: f64) -> Self {
        GeogCsDef {
            name: name.to_string(),
            datum: datum.to_string(),
            spheroid: spheroid.to_string(),
            semi_major,
            inv_flattening,
            prime_meridian: "Greenwich".to_string(),
            prime_meridian_offset: 0.0,
            angular_unit: units::DEGREE.to_string(),
            angular_conv: units::DEGREE_CONV,
        }
    }

    pub fn with_prime_meridian(mut self, name: &str, offset: f64) -> Self {
        self.prime_meridian = name.to_string();
        self.prime_meridian_offset = offset;
        self
    }

    pub fn with_angular_unit(mut self, name: &str, radians_per_unit: f64) -> Self {
        self.angular_unit = name.to_string();
        self.angular_conv = radians_per_unit;
        self
    }

    fn to_node(&self) -> WktNode {
        let spheroid = WktNode::with_leaves(nodes::SPHEROID, &[
            &self.spheroid,
            &format_number(self.semi_major),
            &format_number(self.inv_flattening),
        ]);
        let datum = WktNode::with_children(nodes::DATUM, vec![WktNode::new(self.datum.as_str()), spheroid]);
        let primem = WktNode::with_leaves(nodes::PRIMEM, &[
            &self.prime_meridian,
            &format_number(self.prime_meridian_offset),
        ]);
        let unit = WktNode::with_leaves(nodes::UNIT, &[&self.angular_unit, &format_number(self.angular_conv)]);

        WktNode::with_children(nodes::GEOGCS, vec![WktNode::new(self.name.as_str()), datum, primem, unit])
    }
}

/// A coordinate reference system definition
#[derive(Debug, Clone, Default)]
pub struct SpatialReference {
    root: Option<WktNode>,
    norm: Option<NormInfo>,
}

impl PartialEq for SpatialReference {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wkt())
    }
}

impl SpatialReference {
    /// Creates an empty definition
    pub fn new() -> Self {
        SpatialReference::default()
    }

    /// Wraps an existing tree
    pub fn from_root(root: WktNode) -> Self {
        SpatialReference { root: Some(root), norm: None }
    }

    pub fn from_wkt(text: &str) -> SrsResult<Self> {
        let mut srs = SpatialReference::new();
        srs.import_from_wkt(text)?;
        Ok(srs)
    }

    pub fn from_epsg(code: u32) -> SrsResult<Self> {
        let mut srs = SpatialReference::new();
        srs.import_from_epsg(code)?;
        Ok(srs)
    }

    pub fn from_proj4(text: &str) -> SrsResult<Self> {
        let mut srs = SpatialReference::new();
        srs.import_from_proj4(text)?;
        Ok(srs)
    }

    pub fn from_esri_wkt(text: &str) -> SrsResult<Self> {
        let mut srs = SpatialReference::new();
        srs.import_from_esri(text)?;
        Ok(srs)
    }

    /// Interprets free-form user input.
    ///
    /// Accepts `EPSG:n`, a bare integer code, a Proj4 string, a well-known
    /// name (`WGS84`, `NAD27`, ...), `ESRI::<wkt>`, `@path` to read a file, or
    /// OGC WKT.
    pub fn from_user_input(input: &str) -> SrsResult<Self> {
        let text = input.trim();

        if let Some(path) = text.strip_prefix('@') {
            return SpatialReference::from_user_input(&read_definition_file(path)?);
        }
        if let Some(esri) = text.strip_prefix("ESRI::") {
            return SpatialReference::from_esri_wkt(esri);
        }
        if let Some(code) = strip_epsg_prefix(text) {
            return SpatialReference::from_epsg(parse_epsg_code(code)?);
        }
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            return SpatialReference::from_epsg(parse_epsg_code(text)?);
        }
        if text.starts_with("+") || text.contains("+proj=") || text.contains("+init=") {
            return SpatialReference::from_proj4(text);
        }
        if let Some(gcs) = well_known::well_known_geog_cs(text) {
            return Ok(SpatialReference::from_root(gcs?));
        }
        SpatialReference::from_wkt(text)
    }

    // ---- import / export -------------------------------------------------

    /// Replaces the definition with parsed OGC WKT
    pub fn import_from_wkt(&mut self, text: &str) -> SrsResult<()> {
        let root = WktNode::parse(text)?;
        if !ACCEPTED_ROOTS.iter().any(|k| k.eq_ignore_ascii_case(root.value())) {
            return Err(SrsError::UnsupportedFormat(format!(
                "unsupported root keyword {}", root.value()
            )));
        }
        self.replace_root(Some(root));
        Ok(())
    }

    /// Replaces the definition with the one registered under an EPSG code
    pub fn import_from_epsg(&mut self, code: u32) -> SrsResult<()> {
        let resolved = crate::epsg::resolve(&Registry::global(), code)?;
        *self = resolved;
        Ok(())
    }

    /// Replaces the definition with a decoded Proj4 string
    pub fn import_from_proj4(&mut self, text: &str) -> SrsResult<()> {
        let decoded = crate::proj4::decode(text)?;
        *self = decoded;
        Ok(())
    }

    /// Replaces the definition with Esri-dialect WKT, translated to OGC names
    pub fn import_from_esri(&mut self, text: &str) -> SrsResult<()> {
        let mut staged = SpatialReference::from_root(WktNode::parse(text)?);
        staged.morph_from_esri()?;
        *self = staged;
        Ok(())
    }

    /// Single-line WKT; empty when there is no definition
    pub fn to_wkt(&self) -> String {
        self.root.as_ref().map(|r| r.to_wkt()).unwrap_or_default()
    }

    /// Indented multi-line WKT
    pub fn to_pretty_wkt(&self) -> String {
        self.root.as_ref().map(|r| r.to_pretty_wkt()).unwrap_or_default()
    }

    pub fn to_proj4(&self) -> SrsResult<String> {
        crate::proj4::encode(self)
    }

    /// Esri-dialect WKT of a translated copy; `self` is not modified
    pub fn to_esri_wkt(&self) -> SrsResult<String> {
        let mut copy = self.clone();
        copy.morph_to_esri()?;
        Ok(copy.to_wkt())
    }

    /// Rewrites the tree in place into the Esri dialect
    pub fn morph_to_esri(&mut self) -> SrsResult<()> {
        crate::esri::morph_to_esri(self)?;
        self.invalidate();
        Ok(())
    }

    /// Rewrites an Esri-dialect tree in place into OGC names
    pub fn morph_from_esri(&mut self) -> SrsResult<()> {
        crate::esri::morph_from_esri(self)?;
        self.invalidate();
        Ok(())
    }

    // ---- tree access -----------------------------------------------------

    pub fn root(&self) -> Option<&WktNode> {
        self.root.as_ref()
    }

    /// Mutable root access; cached factors are dropped
    pub fn root_mut(&mut self) -> Option<&mut WktNode> {
        self.norm = None;
        self.root.as_mut()
    }

    pub fn set_root(&mut self, root: WktNode) {
        self.replace_root(Some(root));
    }

    pub fn clear(&mut self) {
        self.replace_root(None);
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn replace_root(&mut self, root: Option<WktNode>) {
        self.root = root;
        self.norm = None;
    }

    fn root_is(&self, keyword: &str) -> bool {
        self.root.as_ref().map(|r| r.value().eq_ignore_ascii_case(keyword)).unwrap_or(false)
    }

    pub fn get_attr_node(&self, path: &str) -> Option<&WktNode> {
        self.root.as_ref()?.get_attr_node(path)
    }

    /// Mutable path lookup; cached factors are dropped
    pub fn get_attr_node_mut(&mut self, path: &str) -> Option<&mut WktNode> {
        self.norm = None;
        self.root.as_mut()?.get_attr_node_mut(path)
    }

    pub fn get_attr_value(&self, path: &str, child_index: usize) -> Option<&str> {
        self.root.as_ref()?.get_attr_value(path, child_index)
    }

    /// Sets the first child of the node at `path`, creating missing nodes.
    ///
    /// When the root is absent or named differently from the first path
    /// component, a fresh root replaces it.
    pub fn set_node(&mut self, path: &str, value: &str) {
        let mut components = path.split('|');
        let first = components.next().unwrap_or_default();

        if !self.root_is(first) {
            self.root = Some(WktNode::new(first));
        }
        self.norm = None;

        let mut node = match self.root.as_mut() {
            Some(root) => root,
            None => return,
        };
        for component in components {
            let index = match node.find_child(component) {
                Some(index) => index,
                None => {
                    node.add_child(WktNode::new(component));
                    node.child_count() - 1
                },
            };
            node = match node.child_mut(index) {
                Some(child) => child,
                None => return,
            };
        }

        match node.child_mut(0) {
            Some(child) => child.set_value(value),
            None => node.add_child(WktNode::new(value)),
        }
    }

    pub fn fixup_ordering(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.fixup_ordering();
        }
    }

    /// Removes every node of the given kind; returns how many went
    pub fn strip_nodes(&mut self, kind: &str) -> usize {
        self.norm = None;
        self.root.as_mut().map(|r| r.strip_nodes(kind)).unwrap_or(0)
    }

    // ---- normalization cache ---------------------------------------------

    /// Drops cached unit factors
    pub fn invalidate(&mut self) {
        self.norm = None;
    }

    /// Computes and caches unit factors when needed
    pub fn ensure_norm_info(&mut self) -> NormInfo {
        match self.norm {
            Some(info) => info,
            None => {
                let info = self.compute_norm_info();
                self.norm = Some(info);
                info
            },
        }
    }

    /// Cached unit factors, or freshly computed ones when nothing is cached
    pub fn norm_info(&self) -> NormInfo {
        self.norm.unwrap_or_else(|| self.compute_norm_info())
    }

    fn compute_norm_info(&self) -> NormInfo {
        let (_, from_greenwich) = self.prime_meridian();
        let (_, to_meter) = self.linear_units();
        let (_, radians) = self.angular_units();
        NormInfo::from_units(from_greenwich, to_meter, radians)
    }

    // ---- kind tests ------------------------------------------------------

    pub fn is_projected(&self) -> bool {
        match &self.root {
            Some(root) if root.value().eq_ignore_ascii_case(nodes::PROJCS) => true,
            Some(root) if root.value().eq_ignore_ascii_case(nodes::COMPD_CS) => {
                root.find_child(nodes::PROJCS).is_some()
            },
            _ => false,
        }
    }

    pub fn is_geographic(&self) -> bool {
        match &self.root {
            Some(root) if root.value().eq_ignore_ascii_case(nodes::GEOGCS) => true,
            Some(root) if root.value().eq_ignore_ascii_case(nodes::COMPD_CS) => {
                root.find_child(nodes::GEOGCS).is_some() && root.find_child(nodes::PROJCS).is_none()
            },
            _ => false,
        }
    }

    pub fn is_local(&self) -> bool {
        self.root_is(nodes::LOCAL_CS)
    }

    /// Name of the root node (first child of the root)
    pub fn name(&self) -> Option<&str> {
        self.root.as_ref()?.child_value(0)
    }

    // ---- geographic part -------------------------------------------------

    /// Installs a geographic coordinate system.
    ///
    /// In a projected definition the existing `GEOGCS` is replaced (or one is
    /// inserted after the name); otherwise the `GEOGCS` becomes the root.
    pub fn set_geog_cs(&mut self, def: &GeogCsDef) -> SrsResult<()> {
        self.install_geog_cs(def.to_node())
    }

    fn install_geog_cs(&mut self, gcs: WktNode) -> SrsResult<()> {
        if self.is_local() {
            return Err(SrsError::UnsupportedFormat(
                "cannot attach a geographic system to a local system".to_string(),
            ));
        }
        self.norm = None;

        match self.root.as_mut() {
            Some(root) if root.value().eq_ignore_ascii_case(nodes::PROJCS) => {
                match root.find_child(nodes::GEOGCS) {
                    Some(index) => {
                        root.destroy_child(index);
                        root.insert_child(index, gcs);
                    },
                    None => root.insert_child(1, gcs),
                }
            },
            _ => self.root = Some(gcs),
        }
        Ok(())
    }

    /// Installs one of `WGS84`, `WGS72`, `NAD27`, `NAD83` or `EPSG:n`
    pub fn set_well_known_geog_cs(&mut self, name: &str) -> SrsResult<()> {
        let gcs = match well_known::well_known_geog_cs(name) {
            Some(node) => node?,
            None => {
                let code = strip_epsg_prefix(name).ok_or_else(|| {
                    SrsError::NotFound(format!("unknown geographic system {}", name))
                })?;
                let other = SpatialReference::from_epsg(parse_epsg_code(code)?)?;
                other
                    .get_attr_node(nodes::GEOGCS)
                    .cloned()
                    .ok_or_else(|| SrsError::NotFound(format!("{} has no geographic system", name)))?
            },
        };
        self.install_geog_cs(gcs)
    }

    /// Copies the `GEOGCS` of another definition into this one
    pub fn copy_geog_cs_from(&mut self, other: &SpatialReference) -> SrsResult<()> {
        let gcs = other
            .get_attr_node(nodes::GEOGCS)
            .cloned()
            .ok_or_else(|| SrsError::NotFound("source has no geographic system".to_string()))?;
        self.install_geog_cs(gcs)
    }

    /// A standalone definition holding only the geographic part
    pub fn clone_geog_cs(&self) -> Option<SpatialReference> {
        self.get_attr_node(nodes::GEOGCS)
            .cloned()
            .map(SpatialReference::from_root)
    }

    /// Whether both definitions share datum, prime meridian, angular unit
    /// and ellipsoid
    pub fn is_same_geog_cs(&self, other: &SpatialReference) -> bool {
        let datum_a = self.get_attr_value(nodes::DATUM, 0).unwrap_or("");
        let datum_b = other.get_attr_value(nodes::DATUM, 0).unwrap_or("");
        if !datum_a.eq_ignore_ascii_case(datum_b) {
            return false;
        }

        nearly_equal(self.prime_meridian().1, other.prime_meridian().1, 1e-8)
            && nearly_equal(self.angular_units().1, other.angular_units().1, 1e-8)
            && nearly_equal(self.semi_major(), other.semi_major(), 0.01)
            && nearly_equal(self.inv_flattening(), other.inv_flattening(), 0.0001)
    }

    pub fn datum_name(&self) -> Option<&str> {
        self.get_attr_value(nodes::DATUM, 0)
    }

    /// Semi-major axis in meters; WGS84 when no ellipsoid is defined
    pub fn semi_major(&self) -> f64 {
        self.get_attr_value(nodes::SPHEROID, 1)
            .map(atof)
            .unwrap_or(datums::WGS84_SEMIMAJOR)
    }

    /// Inverse flattening; 0 for a sphere
    pub fn inv_flattening(&self) -> f64 {
        self.get_attr_value(nodes::SPHEROID, 2)
            .map(atof)
            .unwrap_or(datums::WGS84_INVFLATTENING)
    }

    pub fn semi_minor(&self) -> f64 {
        let a = self.semi_major();
        let rf = self.inv_flattening();
        if rf.abs() < 1e-6 { a } else { a * (1.0 - 1.0 / rf) }
    }

    /// Name and offset of the prime meridian; Greenwich when absent
    pub fn prime_meridian(&self) -> (String, f64) {
        match self.get_attr_node(nodes::PRIMEM) {
            Some(node) if node.child_count() >= 2 => (
                node.child_value(0).unwrap_or_default().to_string(),
                atof(node.child_value(1).unwrap_or("0")),
            ),
            _ => ("Greenwich".to_string(), 0.0),
        }
    }

    /// Attaches Bursa-Wolf parameters to the datum
    pub fn set_towgs84(&mut self, values: [f64; 7]) -> SrsResult<()> {
        let datum = self
            .get_attr_node_mut(nodes::DATUM)
            .ok_or_else(|| SrsError::NotFound("definition has no datum".to_string()))?;

        if let Some(index) = datum.find_child(nodes::TOWGS84) {
            datum.destroy_child(index);
        }
        let formatted: Vec<String> = values.iter().map(|v| format_number(*v)).collect();
        let leaves: Vec<&str> = formatted.iter().map(|s| s.as_str()).collect();
        let towgs84 = WktNode::with_leaves(nodes::TOWGS84, &leaves);

        let position = datum.find_child(nodes::AUTHORITY).unwrap_or(datum.child_count());
        datum.insert_child(position, towgs84);
        Ok(())
    }

    /// Bursa-Wolf parameters, when present. Shorter lists are padded with zeros.
    pub fn towgs84(&self) -> Option<[f64; 7]> {
        let node = self.get_attr_node(nodes::TOWGS84)?;
        if node.child_count() < 3 {
            return None;
        }
        let mut values = [0.0; 7];
        for (slot, child) in values.iter_mut().zip(node.children()) {
            *slot = atof(child.value());
        }
        Some(values)
    }

    // ---- units -----------------------------------------------------------

    fn linear_unit_owner(&self) -> Option<&WktNode> {
        let root = self.root.as_ref()?;
        if root.value().eq_ignore_ascii_case(nodes::COMPD_CS) {
            let index = root.find_child(nodes::PROJCS)?;
            return root.child(index);
        }
        match root.value() {
            v if v.eq_ignore_ascii_case(nodes::PROJCS)
                || v.eq_ignore_ascii_case(nodes::LOCAL_CS)
                || v.eq_ignore_ascii_case("GEOCCS") => Some(root),
            _ => None,
        }
    }

    /// Name and meters-per-unit of the linear unit; `("unknown", 1.0)` when
    /// none is defined
    pub fn linear_units(&self) -> (String, f64) {
        self.linear_unit_owner()
            .and_then(|owner| unit_of(owner))
            .unwrap_or_else(|| (UNKNOWN.to_string(), 1.0))
    }

    /// Sets the linear unit without touching stored parameter values
    pub fn set_linear_units(&mut self, name: &str, to_meters: f64) -> SrsResult<()> {
        let root = self
            .root
            .as_mut()
            .ok_or_else(|| SrsError::NotFound("no definition to attach units to".to_string()))?;
        let owner = if root.value().eq_ignore_ascii_case(nodes::PROJCS)
            || root.value().eq_ignore_ascii_case(nodes::LOCAL_CS)
            || root.value().eq_ignore_ascii_case("GEOCCS")
        {
            root
        } else {
            return Err(SrsError::UnsupportedFormat(format!(
                "linear units cannot be set on {}", root.value()
            )));
        };
        set_unit_child(owner, name, to_meters);
        self.norm = None;
        Ok(())
    }

    /// Sets the linear unit and rescales linear parameters so their
    /// normalized values stay the same
    pub fn set_linear_units_and_update_parameters(&mut self, name: &str, to_meters: f64) -> SrsResult<()> {
        let old = self.ensure_norm_info().to_meter;
        if to_meters <= 0.0 {
            return Err(SrsError::GenericError(format!("invalid linear unit factor {}", to_meters)));
        }
        let ratio = old / to_meters;

        if let Some(projcs) = self.root.as_mut().filter(|r| r.value().eq_ignore_ascii_case(nodes::PROJCS)) {
            for index in 0..projcs.child_count() {
                let parameter = match projcs.child_mut(index) {
                    Some(p) if p.value().eq_ignore_ascii_case(nodes::PARAMETER) && p.child_count() >= 2 => p,
                    _ => continue,
                };
                let is_linear = parameter.child_value(0).map(is_linear_parameter).unwrap_or(false);
                if !is_linear || ratio == 1.0 {
                    continue;
                }
                let value = atof(parameter.child_value(1).unwrap_or("0")) * ratio;
                if let Some(leaf) = parameter.child_mut(1) {
                    leaf.set_value(format_number(value));
                }
            }
        }
        self.set_linear_units(name, to_meters)
    }

    /// Name and radians-per-unit of the angular unit; degrees when absent
    pub fn angular_units(&self) -> (String, f64) {
        self.get_attr_node(nodes::GEOGCS)
            .and_then(unit_of)
            .unwrap_or_else(|| (units::DEGREE.to_string(), units::DEGREE_CONV))
    }

    pub fn set_angular_units(&mut self, name: &str, to_radians: f64) -> SrsResult<()> {
        let gcs = self
            .get_attr_node_mut(nodes::GEOGCS)
            .ok_or_else(|| SrsError::NotFound("definition has no geographic system".to_string()))?;
        set_unit_child(gcs, name, to_radians);
        Ok(())
    }

    // ---- authority -------------------------------------------------------

    /// Attaches `AUTHORITY[authority, code]` to the node at `target`,
    /// replacing any previous authority there
    pub fn set_authority(&mut self, target: &str, authority: &str, code: u32) -> SrsResult<()> {
        let node = self
            .get_attr_node_mut(target)
            .ok_or_else(|| SrsError::NotFound(format!("no {} node to attach authority to", target)))?;
        if let Some(index) = node.find_child(nodes::AUTHORITY) {
            node.destroy_child(index);
        }
        node.add_child(WktNode::with_leaves(nodes::AUTHORITY, &[authority, &code.to_string()]));
        Ok(())
    }

    fn authority_node(&self, target: Option<&str>) -> Option<&WktNode> {
        let node = match target {
            Some(path) => self.get_attr_node(path)?,
            None => self.root.as_ref()?,
        };
        let index = node.find_child(nodes::AUTHORITY)?;
        node.child(index)
    }

    /// Authority name of the node at `target` (root when `None`)
    pub fn authority_name(&self, target: Option<&str>) -> Option<&str> {
        self.authority_node(target)?.child_value(0)
    }

    /// Authority code of the node at `target` (root when `None`)
    pub fn authority_code(&self, target: Option<&str>) -> Option<&str> {
        self.authority_node(target)?.child_value(1)
    }

    // ---- projected and local systems -------------------------------------

    /// Names the projected system, wrapping a geographic root if needed
    pub fn set_proj_cs(&mut self, name: &str) -> SrsResult<()> {
        self.ensure_projcs()?;
        if let Some(root) = self.root.as_mut() {
            match root.child_mut(0) {
                Some(child) if child.is_leaf() => child.set_value(name),
                _ => root.insert_child(0, WktNode::new(name)),
            }
        }
        Ok(())
    }

    /// Turns the definition into a `LOCAL_CS` with the given name
    pub fn set_local_cs(&mut self, name: &str) -> SrsResult<()> {
        match self.root.as_mut() {
            None => {
                self.root = Some(WktNode::with_leaves(nodes::LOCAL_CS, &[name]));
            },
            Some(root) if root.value().eq_ignore_ascii_case(nodes::LOCAL_CS) => {
                match root.child_mut(0) {
                    Some(child) => child.set_value(name),
                    None => root.add_child(WktNode::new(name)),
                }
            },
            Some(root) => {
                return Err(SrsError::UnsupportedFormat(format!(
                    "cannot turn {} into a local system", root.value()
                )));
            },
        }
        self.norm = None;
        Ok(())
    }

    /// Makes sure the root is `PROJCS`, wrapping a geographic root
    fn ensure_projcs(&mut self) -> SrsResult<&mut WktNode> {
        self.norm = None;
        let root = self.root.take();
        let projcs = match root {
            None => WktNode::with_leaves(nodes::PROJCS, &[UNNAMED]),
            Some(r) if r.value().eq_ignore_ascii_case(nodes::PROJCS) => r,
            Some(r) if r.value().eq_ignore_ascii_case(nodes::GEOGCS) => {
                WktNode::with_children(nodes::PROJCS, vec![WktNode::new(UNNAMED), r])
            },
            Some(r) => {
                let kind = r.value().to_string();
                self.root = Some(r);
                return Err(SrsError::UnsupportedFormat(format!(
                    "cannot project a {} definition", kind
                )));
            },
        };
        Ok(self.root.insert(projcs))
    }

    /// Replaces the axes of the node at `target` (e.g. `GEOGCS`)
    pub fn set_axes(&mut self, target: &str, first: (&str, &str), second: (&str, &str)) -> SrsResult<()> {
        let node = self
            .get_attr_node_mut(target)
            .ok_or_else(|| SrsError::NotFound(format!("no {} node to attach axes to", target)))?;
        while let Some(index) = node.find_child(nodes::AXIS) {
            node.destroy_child(index);
        }
        let position = node
            .find_child(nodes::AUTHORITY)
            .or_else(|| node.find_child(nodes::EXTENSION))
            .unwrap_or(node.child_count());
        node.insert_child(position, WktNode::with_leaves(nodes::AXIS, &[second.0, second.1]));
        node.insert_child(position, WktNode::with_leaves(nodes::AXIS, &[first.0, first.1]));
        Ok(())
    }

    /// `(name, orientation)` of each axis of the node at `target`
    pub fn axes(&self, target: &str) -> Vec<(String, String)> {
        self.get_attr_node(target)
            .map(|node| {
                node.children()
                    .iter()
                    .filter(|c| c.value().eq_ignore_ascii_case(nodes::AXIS))
                    .map(|c| (
                        c.child_value(0).unwrap_or_default().to_string(),
                        c.child_value(1).unwrap_or_default().to_string(),
                    ))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ---- projection ------------------------------------------------------

    pub fn projection_name(&self) -> Option<&str> {
        self.get_attr_value(nodes::PROJECTION, 0)
    }

    /// Sets the `PROJECTION` node, keeping existing parameters
    pub fn set_projection_name(&mut self, name: &str) -> SrsResult<()> {
        let projcs = self.ensure_projcs()?;
        match projcs.find_child(nodes::PROJECTION) {
            Some(index) => {
                if let Some(node) = projcs.child_mut(index) {
                    node.clear_children();
                    node.add_child(WktNode::new(name));
                }
            },
            None => {
                let position = projcs
                    .find_child(nodes::GEOGCS)
                    .map(|i| i + 1)
                    .unwrap_or_else(|| projcs.child_count().min(1));
                projcs.insert_child(position, WktNode::with_leaves(nodes::PROJECTION, &[name]));
            },
        }
        Ok(())
    }

    /// Installs a projection and all its parameters, replacing the previous
    /// projection. Values are given in degrees and meters.
    pub fn set_projection(&mut self, projection: &Projection) -> SrsResult<()> {
        self.set_projection_name(projection.kind().wkt_name())?;
        if let Some(root) = self.root.as_mut() {
            while let Some(index) = root.find_child(nodes::PARAMETER) {
                root.destroy_child(index);
            }
        }
        for (name, value) in projection.parameters() {
            self.set_norm_proj_parm(name, value)?;
        }
        Ok(())
    }

    /// The projection with normalized parameter values; `None` when the
    /// definition is not projected or the method is unknown
    pub fn projection(&self) -> Option<Projection> {
        let kind = ProjectionKind::from_wkt_name(self.projection_name()?)?;
        let values: Vec<f64> = kind
            .parameter_names()
            .iter()
            .zip(kind.defaults())
            .map(|(name, default)| self.get_norm_proj_parm(name, *default))
            .collect();
        Some(Projection::from_values(kind, &values))
    }

    fn projcs(&self) -> Option<&WktNode> {
        let root = self.root.as_ref()?;
        if root.value().eq_ignore_ascii_case(nodes::PROJCS) {
            Some(root)
        } else {
            root.get_node(nodes::PROJCS)
        }
    }

    fn parameter_index(projcs: &WktNode, name: &str) -> Option<usize> {
        projcs.children().iter().position(|c| {
            c.value().eq_ignore_ascii_case(nodes::PARAMETER)
                && c.child_value(0).map(|n| n.eq_ignore_ascii_case(name)).unwrap_or(false)
        })
    }

    /// Raw value of a parameter, in the definition's own units
    pub fn proj_parm(&self, name: &str) -> Option<f64> {
        let projcs = self.projcs()?;
        let index = Self::parameter_index(projcs, name)?;
        projcs.child(index)?.child_value(1).map(atof)
    }

    pub fn get_proj_parm(&self, name: &str, default: f64) -> f64 {
        self.proj_parm(name).unwrap_or(default)
    }

    /// Names of all parameters in tree order
    pub fn proj_parm_names(&self) -> Vec<String> {
        self.projcs()
            .map(|projcs| {
                projcs.children()
                    .iter()
                    .filter(|c| c.value().eq_ignore_ascii_case(nodes::PARAMETER))
                    .filter_map(|c| c.child_value(0).map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sets a raw parameter value, adding the parameter after the last
    /// existing one when absent
    pub fn set_proj_parm(&mut self, name: &str, value: f64) -> SrsResult<()> {
        let projcs = self.ensure_projcs()?;
        let text = format_number(value);

        if let Some(index) = Self::parameter_index(projcs, name) {
            if let Some(parameter) = projcs.child_mut(index) {
                match parameter.child_mut(1) {
                    Some(leaf) => leaf.set_value(text),
                    None => parameter.add_child(WktNode::new(text)),
                }
            }
            return Ok(());
        }

        let last_parameter = projcs
            .children()
            .iter()
            .rposition(|c| c.value().eq_ignore_ascii_case(nodes::PARAMETER));
        let position = match last_parameter {
            Some(i) => i + 1,
            None => projcs
                .find_child(nodes::PROJECTION)
                .or_else(|| projcs.find_child(nodes::GEOGCS))
                .map(|i| i + 1)
                .unwrap_or(projcs.child_count()),
        };
        projcs.insert_child(position, WktNode::with_leaves(nodes::PARAMETER, &[name, &text]));
        Ok(())
    }

    /// Removes a parameter; returns whether it existed
    pub fn remove_proj_parm(&mut self, name: &str) -> bool {
        let root = match self.root.as_mut() {
            Some(r) if r.value().eq_ignore_ascii_case(nodes::PROJCS) => r,
            _ => return false,
        };
        match Self::parameter_index(root, name) {
            Some(index) => {
                root.destroy_child(index);
                true
            },
            None => false,
        }
    }

    /// Sets a parameter given in degrees or meters, converting to the
    /// definition's units
    pub fn set_norm_proj_parm(&mut self, name: &str, value: f64) -> SrsResult<()> {
        let info = self.ensure_norm_info();
        let raw = if is_angular_parameter(name) {
            info.angle_from_degrees(value)
        } else if is_linear_parameter(name) {
            info.length_from_meters(value)
        } else {
            value
        };
        self.set_proj_parm(name, raw)?;
        self.norm = Some(info);
        Ok(())
    }

    /// Parameter value converted to degrees or meters
    pub fn get_norm_proj_parm(&self, name: &str, default: f64) -> f64 {
        let raw = match self.proj_parm(name) {
            Some(value) => value,
            None => return default,
        };
        let info = self.norm_info();
        if is_angular_parameter(name) {
            info.angle_to_degrees(raw)
        } else if is_linear_parameter(name) {
            info.length_to_meters(raw)
        } else {
            raw
        }
    }

    // ---- UTM ---------------------------------------------------------------

    /// Configures a Universal Transverse Mercator zone
    pub fn set_utm(&mut self, zone: u32, north: bool) -> SrsResult<()> {
        if !(1..=60).contains(&zone) {
            return Err(SrsError::GenericError(format!("UTM zone {} out of range", zone)));
        }
        self.set_projection(&Projection::TransverseMercator {
            center_lat: 0.0,
            central_meridian: zone as f64 * 6.0 - 183.0,
            scale: 0.9996,
            false_easting: 500000.0,
            false_northing: if north { 0.0 } else { 10000000.0 },
        })?;

        let unnamed = self.name().map(|n| n.is_empty() || n.eq_ignore_ascii_case(UNNAMED)).unwrap_or(true);
        if unnamed {
            let hemisphere = if north { "Northern" } else { "Southern" };
            self.set_proj_cs(&format!("UTM Zone {}, {} Hemisphere", zone, hemisphere))?;
        }
        Ok(())
    }

    /// `(zone, north)` when the projection is exactly a UTM zone
    pub fn utm_zone(&self) -> Option<(u32, bool)> {
        let name = self.projection_name()?;
        if !name.eq_ignore_ascii_case(projections::TRANSVERSE_MERCATOR) {
            return None;
        }
        if self.get_norm_proj_parm(params::LATITUDE_OF_ORIGIN, 0.0) != 0.0
            || self.get_norm_proj_parm(params::SCALE_FACTOR, 1.0) != 0.9996
            || self.get_norm_proj_parm(params::FALSE_EASTING, 0.0) != 500000.0
        {
            return None;
        }
        let north = match self.get_norm_proj_parm(params::FALSE_NORTHING, 0.0) {
            v if v == 0.0 => true,
            v if v == 10000000.0 => false,
            _ => return None,
        };

        let central_meridian = self.get_norm_proj_parm(params::CENTRAL_MERIDIAN, 0.0);
        let zone = ((central_meridian + 183.0) / 6.0 + 0.0000001) as i64;
        if !(1..=60).contains(&zone) {
            return None;
        }
        if (zone as f64 * 6.0 - 183.0 - central_meridian).abs() > 0.00001 {
            return None;
        }
        Some((zone as u32, north))
    }

    // ---- identification --------------------------------------------------

    /// Attaches EPSG authorities to recognizable geographic systems and
    /// UTM zones on them. Returns whether the root now carries an authority.
    pub fn auto_identify_epsg(&mut self) -> bool {
        if self.is_geographic() || self.is_projected() {
            self.identify_geog_cs();
        }
        if self.is_geographic() {
            return self.authority_code(Some(nodes::GEOGCS)).is_some();
        }
        if !self.is_projected() {
            return false;
        }
        if self.authority_code(None).is_some() {
            return true;
        }

        let geog_code = self
            .authority_code(Some(nodes::GEOGCS))
            .map(atoi)
            .unwrap_or(0);
        let code = match (self.utm_zone(), geog_code) {
            (Some((zone, true)), 4326) => 32600 + zone,
            (Some((zone, false)), 4326) => 32700 + zone,
            (Some((zone, true)), 4267) if (3..=22).contains(&zone) => 26700 + zone,
            (Some((zone, true)), 4269) if (1..=23).contains(&zone) => 26900 + zone,
            _ => return false,
        };
        debug!("Identified projected system as EPSG:{}", code);
        match self.set_authority(nodes::PROJCS, "EPSG", code) {
            Ok(()) => true,
            Err(e) => {
                warn!("Unable to attach authority: {}", e);
                false
            },
        }
    }

    fn identify_geog_cs(&mut self) {
        if self.authority_code(Some(nodes::GEOGCS)).is_some() {
            return;
        }
        let degrees = nearly_equal(self.angular_units().1, units::DEGREE_CONV, 1e-12);
        let greenwich = self.prime_meridian().1 == 0.0;
        if !degrees || !greenwich {
            return;
        }

        let datum = self.datum_name().unwrap_or("").to_string();
        let code = if datum.eq_ignore_ascii_case(datums::WGS84) {
            4326
        } else if datum.eq_ignore_ascii_case(datums::NAD27) {
            4267
        } else if datum.eq_ignore_ascii_case(datums::NAD83) {
            4269
        } else if datum.eq_ignore_ascii_case(datums::WGS72) {
            4322
        } else {
            return;
        };
        debug!("Identified geographic system as EPSG:{}", code);
        if let Err(e) = self.set_authority(nodes::GEOGCS, "EPSG", code) {
            warn!("Unable to attach authority: {}", e);
        }
    }
}

/// `(name, factor)` of the `UNIT` among the direct children of `owner`
fn unit_of(owner: &WktNode) -> Option<(String, f64)> {
    let index = owner.find_child(nodes::UNIT)?;
    let unit = owner.child(index)?;
    if unit.child_count() < 2 {
        return None;
    }
    Some((unit.child_value(0)?.to_string(), atof(unit.child_value(1)?)))
}

/// Replaces or inserts the `UNIT` child of `owner`
fn set_unit_child(owner: &mut WktNode, name: &str, factor: f64) {
    let unit = WktNode::with_leaves(nodes::UNIT, &[name, &format_number(factor)]);
    match owner.find_child(nodes::UNIT) {
        Some(index) => {
            owner.destroy_child(index);
            owner.insert_child(index, unit);
        },
        None => {
            let position = owner
                .children()
                .iter()
                .position(|c| {
                    [nodes::AXIS, nodes::AUTHORITY, nodes::EXTENSION]
                        .iter()
                        .any(|k| c.value().eq_ignore_ascii_case(k))
                })
                .unwrap_or(owner.child_count());
            owner.insert_child(position, unit);
        },
    }
}

/// Text after an `EPSG:` prefix (any case), if present
fn strip_epsg_prefix(text: &str) -> Option<&str> {
    let prefix = text.get(..5)?;
    if prefix.eq_ignore_ascii_case("EPSG:") {
        Some(text[5..].trim())
    } else {
        None
    }
}

/// Reads a definition from a file named by `@path` input.
///
/// The content may not name another file; `@` is followed once only.
pub(crate) fn read_definition_file(path: &str) -> SrsResult<String> {
    let content = fs::read_to_string(Path::new(path.trim()))?;
    let content = content.trim();
    if content.starts_with('@') {
        return Err(SrsError::malformed(format!(
            "definition file {} refers to another file",
            path.trim()
        )));
    }
    Ok(content.to_string())
}

fn parse_epsg_code(text: &str) -> SrsResult<u32> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| SrsError::malformed(format!("invalid EPSG code: {}", text)))
}
