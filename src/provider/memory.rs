//! An owned, in-memory geometry model and the [GeometryProvider] over it.

use crate::error::{GeomSerdeError, GeomSerdeResult};
use crate::provider::{CollectionType, GeometryProvider, ProviderGeometryType};

/// A sequence of 2D or 3D coordinates stored as interleaved ordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordSeq {
    ordinates: Vec<f64>,
    dims: usize,
}

impl CoordSeq {
    /// An empty sequence with the given dimension.
    pub fn new(dims: usize) -> Self {
        Self {
            ordinates: vec![],
            dims,
        }
    }

    /// A 2D sequence from `[x, y]` pairs.
    pub fn xy(coords: &[[f64; 2]]) -> Self {
        Self {
            ordinates: coords.iter().flatten().copied().collect(),
            dims: 2,
        }
    }

    /// A 3D sequence from `[x, y, z]` triples.
    pub fn xyz(coords: &[[f64; 3]]) -> Self {
        Self {
            ordinates: coords.iter().flatten().copied().collect(),
            dims: 3,
        }
    }

    pub fn len(&self) -> usize {
        self.ordinates.len().checked_div(self.dims).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.ordinates.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The interleaved ordinates of this sequence.
    pub fn ordinates(&self) -> &[f64] {
        &self.ordinates
    }

    /// The ordinates of the coordinate at `i`.
    pub fn coord(&self, i: usize) -> Option<&[f64]> {
        let start = i.checked_mul(self.dims)?;
        self.ordinates.get(start..start + self.dims)
    }

    fn coord_mut(&mut self, i: usize) -> GeomSerdeResult<&mut [f64]> {
        let dims = self.dims;
        let len = self.len();
        self.ordinates
            .get_mut(i * dims..(i + 1) * dims)
            .ok_or_else(|| {
                GeomSerdeError::Provider(format!(
                    "coordinate index {i} out of bounds for sequence of {len}"
                ))
            })
    }

    fn is_closed(&self) -> bool {
        match (self.coord(0), self.coord(self.len().saturating_sub(1))) {
            (Some(first), Some(last)) => first[0] == last[0] && first[1] == last[1],
            _ => true,
        }
    }
}

/// The kind-specific payload of a [Geometry].
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryKind {
    Point(CoordSeq),
    LineString(CoordSeq),
    LinearRing(CoordSeq),
    /// Exterior ring followed by interior rings; no rings for the empty polygon
    Polygon(Vec<Geometry>),
    MultiPoint(Vec<Geometry>),
    MultiLineString(Vec<Geometry>),
    MultiPolygon(Vec<Geometry>),
    GeometryCollection(Vec<Geometry>),
}

/// An owned geometry with a coordinate dimension and spatial reference id.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    dims: usize,
    srid: i32,
}

impl Geometry {
    fn from_parts(kind: GeometryKind, dims: usize) -> Self {
        Self { kind, dims, srid: 0 }
    }

    fn max_dims(children: &[Geometry]) -> usize {
        children.iter().map(|child| child.dims).max().unwrap_or(2)
    }

    /// A 2D point.
    pub fn point(x: f64, y: f64) -> Self {
        Self::point_from(CoordSeq::xy(&[[x, y]]))
    }

    /// A 3D point.
    pub fn point_z(x: f64, y: f64, z: f64) -> Self {
        Self::point_from(CoordSeq::xyz(&[[x, y, z]]))
    }

    /// The 2D empty point.
    pub fn empty_point() -> Self {
        Self::point_from(CoordSeq::new(2))
    }

    /// A point from a sequence of zero or one coordinates.
    pub fn point_from(seq: CoordSeq) -> Self {
        let dims = seq.dims;
        Self::from_parts(GeometryKind::Point(seq), dims)
    }

    pub fn line_string(seq: CoordSeq) -> Self {
        let dims = seq.dims;
        Self::from_parts(GeometryKind::LineString(seq), dims)
    }

    pub fn linear_ring(seq: CoordSeq) -> Self {
        let dims = seq.dims;
        Self::from_parts(GeometryKind::LinearRing(seq), dims)
    }

    /// A polygon from its exterior ring followed by any interior rings.
    ///
    /// A single empty ring gives the empty polygon.
    pub fn polygon(mut rings: Vec<CoordSeq>) -> Self {
        let dims = rings.first().map_or(2, |ring| ring.dims);
        if rings.len() == 1 && rings[0].is_empty() {
            rings.clear();
        }
        let rings = rings.into_iter().map(Self::linear_ring).collect();
        Self::from_parts(GeometryKind::Polygon(rings), dims)
    }

    pub fn multi_point(points: Vec<Geometry>) -> Self {
        let dims = Self::max_dims(&points);
        Self::from_parts(GeometryKind::MultiPoint(points), dims)
    }

    pub fn multi_line_string(line_strings: Vec<Geometry>) -> Self {
        let dims = Self::max_dims(&line_strings);
        Self::from_parts(GeometryKind::MultiLineString(line_strings), dims)
    }

    pub fn multi_polygon(polygons: Vec<Geometry>) -> Self {
        let dims = Self::max_dims(&polygons);
        Self::from_parts(GeometryKind::MultiPolygon(polygons), dims)
    }

    pub fn geometry_collection(geoms: Vec<Geometry>) -> Self {
        let dims = Self::max_dims(&geoms);
        Self::from_parts(GeometryKind::GeometryCollection(geoms), dims)
    }

    /// Set the spatial reference id.
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    pub fn kind(&self) -> &GeometryKind {
        &self.kind
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn geometry_type(&self) -> ProviderGeometryType {
        match &self.kind {
            GeometryKind::Point(_) => ProviderGeometryType::Point,
            GeometryKind::LineString(_) => ProviderGeometryType::LineString,
            GeometryKind::LinearRing(_) => ProviderGeometryType::LinearRing,
            GeometryKind::Polygon(_) => ProviderGeometryType::Polygon,
            GeometryKind::MultiPoint(_) => ProviderGeometryType::MultiPoint,
            GeometryKind::MultiLineString(_) => ProviderGeometryType::MultiLineString,
            GeometryKind::MultiPolygon(_) => ProviderGeometryType::MultiPolygon,
            GeometryKind::GeometryCollection(_) => ProviderGeometryType::GeometryCollection,
        }
    }

    /// The total number of coordinates, summed over rings and children.
    pub fn num_coords(&self) -> usize {
        match &self.kind {
            GeometryKind::Point(seq)
            | GeometryKind::LineString(seq)
            | GeometryKind::LinearRing(seq) => seq.len(),
            GeometryKind::Polygon(children)
            | GeometryKind::MultiPoint(children)
            | GeometryKind::MultiLineString(children)
            | GeometryKind::MultiPolygon(children)
            | GeometryKind::GeometryCollection(children) => {
                children.iter().map(Geometry::num_coords).sum()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_coords() == 0
    }

    fn children(&self) -> Option<&[Geometry]> {
        match &self.kind {
            GeometryKind::MultiPoint(children)
            | GeometryKind::MultiLineString(children)
            | GeometryKind::MultiPolygon(children)
            | GeometryKind::GeometryCollection(children) => Some(children),
            _ => None,
        }
    }

    fn rings(&self) -> GeomSerdeResult<&[Geometry]> {
        match &self.kind {
            GeometryKind::Polygon(rings) => Ok(rings),
            _ => Err(wrong_type("rings", self.geometry_type())),
        }
    }
}

fn wrong_type(what: &str, geometry_type: ProviderGeometryType) -> GeomSerdeError {
    GeomSerdeError::Provider(format!("{geometry_type:?} has no {what}"))
}

fn check_dims(dims: usize) -> GeomSerdeResult<()> {
    if dims == 2 || dims == 3 {
        Ok(())
    } else {
        Err(GeomSerdeError::Provider(format!(
            "unsupported coordinate dimension {dims}"
        )))
    }
}

/// A [GeometryProvider] over [Geometry].
///
/// Bulk coordinate copy is available unless the provider was created with
/// [MemoryProvider::without_bulk_copy].
#[derive(Debug, Clone, Copy)]
pub struct MemoryProvider {
    bulk_copy: bool,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self { bulk_copy: true }
    }

    /// A provider that only offers the per-coordinate accessors.
    pub fn without_bulk_copy() -> Self {
        Self { bulk_copy: false }
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryProvider for MemoryProvider {
    type Geometry = Geometry;
    type CoordSeq = CoordSeq;

    fn supports_bulk_copy(&self) -> bool {
        self.bulk_copy
    }

    fn geometry_type(&self, geom: &Geometry) -> GeomSerdeResult<ProviderGeometryType> {
        Ok(geom.geometry_type())
    }

    fn srid(&self, geom: &Geometry) -> GeomSerdeResult<i32> {
        Ok(geom.srid)
    }

    fn set_srid(&self, geom: &mut Geometry, srid: i32) -> GeomSerdeResult<()> {
        geom.srid = srid;
        Ok(())
    }

    fn coordinate_dimension(&self, geom: &Geometry) -> GeomSerdeResult<usize> {
        Ok(geom.dims)
    }

    fn num_coordinates(&self, geom: &Geometry) -> GeomSerdeResult<usize> {
        Ok(geom.num_coords())
    }

    fn coord_seq<'a>(&self, geom: &'a Geometry) -> GeomSerdeResult<&'a CoordSeq> {
        match &geom.kind {
            GeometryKind::Point(seq)
            | GeometryKind::LineString(seq)
            | GeometryKind::LinearRing(seq) => Ok(seq),
            _ => Err(wrong_type("coordinate sequence", geom.geometry_type())),
        }
    }

    fn exterior_ring<'a>(&self, geom: &'a Geometry) -> GeomSerdeResult<&'a Geometry> {
        geom.rings()?
            .first()
            .ok_or_else(|| GeomSerdeError::Provider("empty polygon has no exterior ring".into()))
    }

    fn num_interior_rings(&self, geom: &Geometry) -> GeomSerdeResult<usize> {
        Ok(geom.rings()?.len().saturating_sub(1))
    }

    fn interior_ring_n<'a>(&self, geom: &'a Geometry, n: usize) -> GeomSerdeResult<&'a Geometry> {
        geom.rings()?
            .get(n + 1)
            .ok_or_else(|| GeomSerdeError::Provider(format!("interior ring {n} out of bounds")))
    }

    fn num_geometries(&self, geom: &Geometry) -> GeomSerdeResult<usize> {
        Ok(geom.children().map_or(1, |children| children.len()))
    }

    fn geometry_n<'a>(&self, geom: &'a Geometry, n: usize) -> GeomSerdeResult<&'a Geometry> {
        match geom.children() {
            Some(children) => children.get(n),
            None if n == 0 => Some(geom),
            None => None,
        }
        .ok_or_else(|| GeomSerdeError::Provider(format!("child geometry {n} out of bounds")))
    }

    fn coord_seq_size(&self, seq: &CoordSeq) -> GeomSerdeResult<usize> {
        Ok(seq.len())
    }

    fn coord_seq_dimensions(&self, seq: &CoordSeq) -> GeomSerdeResult<usize> {
        Ok(seq.dims)
    }

    fn coord_seq_get_xy(&self, seq: &CoordSeq, idx: usize) -> GeomSerdeResult<(f64, f64)> {
        let (x, y, _) = self.coord_seq_get_xyz(seq, idx)?;
        Ok((x, y))
    }

    fn coord_seq_get_xyz(&self, seq: &CoordSeq, idx: usize) -> GeomSerdeResult<(f64, f64, f64)> {
        let coord = seq.coord(idx).ok_or_else(|| {
            GeomSerdeError::Provider(format!(
                "coordinate index {idx} out of bounds for sequence of {}",
                seq.len()
            ))
        })?;
        let z = coord.get(2).copied().unwrap_or(f64::NAN);
        Ok((coord[0], coord[1], z))
    }

    fn coord_seq_create(&self, size: usize, dims: usize) -> GeomSerdeResult<CoordSeq> {
        check_dims(dims)?;
        let mut ordinates = Vec::new();
        ordinates.try_reserve_exact(size * dims)?;
        ordinates.resize(size * dims, 0.0);
        Ok(CoordSeq { ordinates, dims })
    }

    fn coord_seq_set_xy(&self, seq: &mut CoordSeq, idx: usize, x: f64, y: f64) -> GeomSerdeResult<()> {
        let coord = seq.coord_mut(idx)?;
        coord[0] = x;
        coord[1] = y;
        Ok(())
    }

    fn coord_seq_set_xyz(
        &self,
        seq: &mut CoordSeq,
        idx: usize,
        x: f64,
        y: f64,
        z: f64,
    ) -> GeomSerdeResult<()> {
        let coord = seq.coord_mut(idx)?;
        coord[0] = x;
        coord[1] = y;
        if let Some(slot) = coord.get_mut(2) {
            *slot = z;
        }
        Ok(())
    }

    fn coord_seq_to_buffer(
        &self,
        seq: &CoordSeq,
        out: &mut [f64],
        has_z: bool,
        has_m: bool,
    ) -> GeomSerdeResult<()> {
        let stride = 2 + usize::from(has_z) + usize::from(has_m);
        if out.len() != seq.len() * stride {
            return Err(GeomSerdeError::Provider(format!(
                "output buffer holds {} ordinates, sequence needs {}",
                out.len(),
                seq.len() * stride
            )));
        }

        if !has_m && stride == seq.dims {
            out.copy_from_slice(&seq.ordinates);
            return Ok(());
        }

        for (coord, slot) in seq.ordinates.chunks_exact(seq.dims).zip(out.chunks_exact_mut(stride)) {
            slot[0] = coord[0];
            slot[1] = coord[1];
            if has_z {
                slot[2] = coord.get(2).copied().unwrap_or(f64::NAN);
            }
            if has_m {
                slot[stride - 1] = f64::NAN;
            }
        }
        Ok(())
    }

    fn coord_seq_from_buffer(
        &self,
        buf: &[f64],
        size: usize,
        has_z: bool,
        has_m: bool,
    ) -> GeomSerdeResult<CoordSeq> {
        let stride = 2 + usize::from(has_z) + usize::from(has_m);
        let dims = 2 + usize::from(has_z);
        let src = buf.get(..size * stride).ok_or_else(|| {
            GeomSerdeError::Provider(format!(
                "buffer of {} ordinates is too short for {size} coordinates",
                buf.len()
            ))
        })?;

        let mut ordinates = Vec::new();
        ordinates.try_reserve_exact(size * dims)?;
        if stride == dims {
            ordinates.extend_from_slice(src);
        } else {
            for coord in src.chunks_exact(stride) {
                ordinates.extend_from_slice(&coord[..dims]);
            }
        }
        Ok(CoordSeq { ordinates, dims })
    }

    fn create_empty_point(&self) -> GeomSerdeResult<Geometry> {
        Ok(Geometry::empty_point())
    }

    fn create_point_from_xy(&self, x: f64, y: f64) -> GeomSerdeResult<Geometry> {
        if x.is_nan() && y.is_nan() {
            Ok(Geometry::empty_point())
        } else {
            Ok(Geometry::point(x, y))
        }
    }

    fn create_point(&self, seq: CoordSeq) -> GeomSerdeResult<Geometry> {
        match seq.len() {
            0 => Ok(Geometry::point_from(seq)),
            1 if seq.ordinates.iter().all(|v| v.is_nan()) => {
                Ok(Geometry::point_from(CoordSeq::new(seq.dims)))
            }
            1 => Ok(Geometry::point_from(seq)),
            n => Err(GeomSerdeError::Provider(format!(
                "point requires at most one coordinate, got {n}"
            ))),
        }
    }

    fn create_line_string(&self, seq: CoordSeq) -> GeomSerdeResult<Geometry> {
        if seq.len() == 1 {
            return Err(GeomSerdeError::Provider(
                "line string must contain 0 or more than 1 coordinates".into(),
            ));
        }
        Ok(Geometry::line_string(seq))
    }

    fn create_linear_ring(&self, seq: CoordSeq) -> GeomSerdeResult<Geometry> {
        if !seq.is_empty() && (seq.len() < 4 || !seq.is_closed()) {
            return Err(GeomSerdeError::Provider(format!(
                "linear ring must be closed with 0 or at least 4 coordinates, got {}",
                seq.len()
            )));
        }
        Ok(Geometry::linear_ring(seq))
    }

    fn create_polygon(&self, shell: Geometry, holes: Vec<Geometry>) -> GeomSerdeResult<Geometry> {
        for ring in std::iter::once(&shell).chain(holes.iter()) {
            if ring.geometry_type() != ProviderGeometryType::LinearRing {
                return Err(GeomSerdeError::Provider(format!(
                    "polygon rings must be linear rings, got {:?}",
                    ring.geometry_type()
                )));
            }
        }

        let dims = shell.dims;
        if shell.is_empty() {
            if !holes.is_empty() {
                return Err(GeomSerdeError::Provider(
                    "polygon with an empty shell cannot have holes".into(),
                ));
            }
            return Ok(Geometry::from_parts(GeometryKind::Polygon(vec![]), dims));
        }

        let mut rings = Vec::with_capacity(holes.len() + 1);
        rings.push(shell);
        rings.extend(holes);
        Ok(Geometry::from_parts(GeometryKind::Polygon(rings), dims))
    }

    fn create_collection(
        &self,
        collection_type: CollectionType,
        geoms: Vec<Geometry>,
    ) -> GeomSerdeResult<Geometry> {
        let expected = match collection_type {
            CollectionType::MultiPoint => Some(ProviderGeometryType::Point),
            CollectionType::MultiLineString => Some(ProviderGeometryType::LineString),
            CollectionType::MultiPolygon => Some(ProviderGeometryType::Polygon),
            CollectionType::GeometryCollection => None,
        };
        if let Some(expected) = expected {
            if let Some(other) = geoms.iter().find(|g| g.geometry_type() != expected) {
                return Err(GeomSerdeError::Provider(format!(
                    "{collection_type:?} cannot contain {:?}",
                    other.geometry_type()
                )));
            }
        }

        Ok(match collection_type {
            CollectionType::MultiPoint => Geometry::multi_point(geoms),
            CollectionType::MultiLineString => Geometry::multi_line_string(geoms),
            CollectionType::MultiPolygon => Geometry::multi_polygon(geoms),
            CollectionType::GeometryCollection => Geometry::geometry_collection(geoms),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square() -> CoordSeq {
        CoordSeq::xy(&[[0., 0.], [0., 1.], [1., 1.], [1., 0.], [0., 0.]])
    }

    #[test]
    fn nan_point_is_empty() {
        let provider = MemoryProvider::new();
        let point = provider.create_point_from_xy(f64::NAN, f64::NAN).unwrap();
        assert!(point.is_empty());
        assert_eq!(point, Geometry::empty_point());

        let point = provider
            .create_point(CoordSeq::xyz(&[[f64::NAN, f64::NAN, f64::NAN]]))
            .unwrap();
        assert!(point.is_empty());
        assert_eq!(point.dims(), 3);

        let point = provider.create_point_from_xy(0., 0.).unwrap();
        assert!(!point.is_empty());
    }

    #[test]
    fn polygon_accessors() {
        let provider = MemoryProvider::new();
        let hole = CoordSeq::xy(&[[0.2, 0.2], [0.2, 0.4], [0.4, 0.4], [0.2, 0.2]]);
        let polygon = Geometry::polygon(vec![square(), hole.clone()]);

        assert_eq!(provider.num_coordinates(&polygon).unwrap(), 9);
        assert_eq!(provider.num_interior_rings(&polygon).unwrap(), 1);
        let interior = provider.interior_ring_n(&polygon, 0).unwrap();
        assert_eq!(provider.coord_seq(interior).unwrap(), &hole);
        assert!(provider.interior_ring_n(&polygon, 1).is_err());
    }

    #[test]
    fn empty_shell_is_empty_polygon() {
        let provider = MemoryProvider::new();
        let shell = provider.create_linear_ring(CoordSeq::new(3)).unwrap();
        let polygon = provider.create_polygon(shell, vec![]).unwrap();
        assert!(matches!(polygon.kind(), GeometryKind::Polygon(rings) if rings.is_empty()));
        assert_eq!(polygon.dims(), 3);
    }

    #[test]
    fn open_ring_is_rejected() {
        let provider = MemoryProvider::new();
        let open = CoordSeq::xy(&[[0., 0.], [0., 1.], [1., 1.], [1., 0.]]);
        assert!(matches!(
            provider.create_linear_ring(open),
            Err(GeomSerdeError::Provider(_))
        ));
    }

    #[test]
    fn bulk_copy_matches_accessors() {
        let provider = MemoryProvider::new();
        let seq = CoordSeq::xy(&[[1., 2.], [3., 4.]]);

        let mut out = vec![0.0; 6];
        provider.coord_seq_to_buffer(&seq, &mut out, true, false).unwrap();
        assert_eq!(&out[..2], &[1., 2.]);
        assert!(out[2].is_nan());
        assert_eq!(provider.coord_seq_get_xyz(&seq, 1).unwrap().0, 3.);

        let back = provider
            .coord_seq_from_buffer(&[1., 2., 9., 3., 4., 9.], 2, false, true)
            .unwrap();
        assert_eq!(back, seq);
    }

    #[test]
    fn collection_children_are_checked() {
        let provider = MemoryProvider::new();
        let line = Geometry::line_string(CoordSeq::xy(&[[0., 0.], [1., 1.]]));
        assert!(provider
            .create_collection(CollectionType::MultiPoint, vec![line.clone()])
            .is_err());

        let collection = provider
            .create_collection(
                CollectionType::GeometryCollection,
                vec![line, Geometry::point_z(1., 2., 3.)],
            )
            .unwrap();
        assert_eq!(collection.dims(), 3);
        assert_eq!(provider.num_geometries(&collection).unwrap(), 2);
    }

    #[test]
    fn zero_dimension_sequence_is_empty() {
        let seq = CoordSeq::new(0);
        assert_eq!(seq.len(), 0);
        assert!(seq.is_empty());

        let buf = crate::serialize(&MemoryProvider::new(), &Geometry::line_string(seq)).unwrap();
        assert_eq!(buf.len(), 8);
    }
}
