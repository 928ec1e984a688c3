use glam::f64::DVec3;
use glam::i32::IVec3;

/// A periodic simulation cell spanned by three basis vectors.
///
/// Site positions live in real space; lattice space expresses positions as
/// fractional multiples of the basis vectors. Periodic images of a point are
/// obtained by adding integer combinations of `a`, `b` and `c`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    pub a: DVec3,
    pub b: DVec3,
    pub c: DVec3,
}

/// Result of a minimum-image search: the translated position together with
/// the integer cell shift that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinImage {
    /// The image of the queried point closest to the reference point.
    pub position: DVec3,
    /// Integer cell shift applied to the queried point, in lattice units.
    pub shift: IVec3,
}

impl MinImage {
    /// Returns `true` when the closest image is the point itself, i.e. no
    /// periodic translation was needed.
    pub fn is_identity(&self) -> bool {
        self.shift == IVec3::ZERO
    }
}

impl UnitCell {
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        UnitCell { a, b, c }
    }

    /// Creates an axis-aligned cubic cell with the given edge length.
    pub fn cubic(size: f64) -> Self {
        UnitCell {
            a: DVec3::new(size, 0.0, 0.0),
            b: DVec3::new(0.0, size, 0.0),
            c: DVec3::new(0.0, 0.0, size),
        }
    }

    /// Converts lattice coordinates to real space coordinates using the cell basis vectors.
    ///
    /// # Arguments
    /// * `lattice_pos` - Position in lattice coordinates as DVec3
    ///
    /// # Returns
    /// Position in real space coordinates as DVec3
    pub fn lattice_to_real(&self, lattice_pos: &DVec3) -> DVec3 {
        lattice_pos.x * self.a + lattice_pos.y * self.b + lattice_pos.z * self.c
    }

    /// Converts an integer cell shift to the real space translation it represents.
    pub fn shift_to_real(&self, shift: &IVec3) -> DVec3 {
        self.lattice_to_real(&shift.as_dvec3())
    }

    /// Converts a position from real space coordinates to lattice space coordinates.
    ///
    /// Given a position in real space, finds the fractional coordinates
    /// (u, v, w) such that: real_pos = u*a + v*b + w*c. The conversion solves
    /// the linear system using the inverse of the cell matrix [a, b, c],
    /// computed by Cramer's rule.
    ///
    /// # Arguments
    /// * `real_pos` - Position in real space coordinates as DVec3
    ///
    /// # Returns
    /// * Position in lattice space coordinates as DVec3
    ///
    /// # Panics
    /// * Panics if the cell matrix is singular (determinant is zero)
    pub fn real_to_lattice(&self, real_pos: &DVec3) -> DVec3 {
        let det = self.a.dot(self.b.cross(self.c));

        // Degenerate cells have no inverse
        if det.abs() < 1e-12 {
            panic!("Unit cell matrix is singular - cannot convert from real to lattice coordinates");
        }

        // For matrix [a, b, c], the inverse is (1/det) * [b×c, c×a, a×b]^T
        let inv_det = 1.0 / det;
        let inv_a = self.b.cross(self.c) * inv_det;
        let inv_b = self.c.cross(self.a) * inv_det;
        let inv_c = self.a.cross(self.b) * inv_det;

        DVec3::new(
            inv_a.dot(*real_pos),
            inv_b.dot(*real_pos),
            inv_c.dot(*real_pos),
        )
    }

    /// Finds the periodic image of `pos` closest to `reference`.
    ///
    /// The search first rounds the fractional displacement to get a candidate
    /// shift, then scans the surrounding shell of 27 shifts. Componentwise
    /// rounding alone can pick the wrong image in strongly skewed cells.
    ///
    /// Distance ties keep the smallest-magnitude shift, so a pair separated by
    /// exactly half a cell resolves the same way from either endpoint.
    ///
    /// # Arguments
    /// * `reference` - Fixed point the distance is measured from, in real space
    /// * `pos` - Point whose images are searched, in real space
    ///
    /// # Returns
    /// * The closest image position and the integer shift that produced it
    ///
    /// # Panics
    /// * Panics if the cell matrix is singular (determinant is zero)
    pub fn min_image(&self, reference: &DVec3, pos: &DVec3) -> MinImage {
        let delta_lattice = self.real_to_lattice(&(*pos - *reference));
        let base = IVec3::new(
            (-delta_lattice.x).round() as i32,
            (-delta_lattice.y).round() as i32,
            (-delta_lattice.z).round() as i32,
        );

        let mut best_shift = base;
        let mut best_pos = *pos;
        let mut best_dist_sq = f64::INFINITY;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let shift = base + IVec3::new(dx, dy, dz);
                    let candidate = *pos + self.shift_to_real(&shift);
                    let dist_sq = candidate.distance_squared(*reference);
                    let better = dist_sq < best_dist_sq
                        || (dist_sq == best_dist_sq
                            && shift.length_squared() < best_shift.length_squared());
                    if better {
                        best_dist_sq = dist_sq;
                        best_shift = shift;
                        best_pos = candidate;
                    }
                }
            }
        }

        MinImage {
            position: best_pos,
            shift: best_shift,
        }
    }
}
