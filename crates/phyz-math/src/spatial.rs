//! Spatial (6D) vectors, Plücker transforms and rigid-body inertia.
//!
//! Vectors are stacked angular part first: a motion vector is `[ω; v]`, a
//! force vector is `[n; f]`.
//!
//! Inertial parameters of a body are ordered
//! `[m, m·cx, m·cy, m·cz, Ixx, Ixy, Ixz, Iyy, Iyz, Izz]`, with the rotational
//! inertia taken about the body frame origin.

use crate::{Mat3, Mat6, Mat6x10, Vec3, Vec6, Vec10, rpy_matrix, skew};

/// Number of inertial parameters carried by one rigid body.
pub const INERTIAL_PARAMS: usize = 10;

/// A motion or force vector in some body frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialVec {
    /// `[angular; linear]`
    pub data: Vec6,
}

impl SpatialVec {
    #[inline]
    pub fn new(angular: Vec3, linear: Vec3) -> Self {
        let mut data = Vec6::zeros();
        data.fixed_rows_mut::<3>(0).copy_from(&angular);
        data.fixed_rows_mut::<3>(3).copy_from(&linear);
        Self { data }
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            data: Vec6::zeros(),
        }
    }

    #[inline]
    pub fn angular(&self) -> Vec3 {
        self.data.fixed_rows::<3>(0).into_owned()
    }

    #[inline]
    pub fn linear(&self) -> Vec3 {
        self.data.fixed_rows::<3>(3).into_owned()
    }

    /// `self ×ₘ m` for a motion vector `m`.
    pub fn cross_motion(&self, m: &SpatialVec) -> SpatialVec {
        let (w, v) = (self.angular(), self.linear());
        SpatialVec::new(
            w.cross(&m.angular()),
            w.cross(&m.linear()) + v.cross(&m.angular()),
        )
    }

    /// `self ×* f` for a force vector `f`.
    pub fn cross_force(&self, f: &SpatialVec) -> SpatialVec {
        let (w, v) = (self.angular(), self.linear());
        SpatialVec::new(
            w.cross(&f.angular()) + v.cross(&f.linear()),
            w.cross(&f.linear()),
        )
    }
}

impl std::ops::Add for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn add(self, rhs: SpatialVec) -> SpatialVec {
        SpatialVec {
            data: self.data + rhs.data,
        }
    }
}

impl std::ops::Sub for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn sub(self, rhs: SpatialVec) -> SpatialVec {
        SpatialVec {
            data: self.data - rhs.data,
        }
    }
}

impl std::ops::Mul<f64> for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn mul(self, s: f64) -> SpatialVec {
        SpatialVec {
            data: self.data * s,
        }
    }
}

/// Coordinate change from a frame A to a frame B.
///
/// `rot` maps A coordinates to B coordinates and `pos` is B's origin in A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialTransform {
    pub rot: Mat3,
    pub pos: Vec3,
}

impl SpatialTransform {
    pub fn new(rot: Mat3, pos: Vec3) -> Self {
        Self { rot, pos }
    }

    pub fn identity() -> Self {
        Self::translation(Vec3::zeros())
    }

    pub fn translation(pos: Vec3) -> Self {
        Self {
            rot: Mat3::identity(),
            pos,
        }
    }

    /// Child frame placed at `xyz` with fixed-axis `rpy` angles in the parent.
    ///
    /// `Rz(y)·Ry(p)·Rx(r)` maps child coordinates into the parent, so the
    /// stored rotation is its transpose.
    pub fn from_xyz_rpy(xyz: [f64; 3], rpy: [f64; 3]) -> Self {
        let [roll, pitch, yaw] = rpy;
        Self {
            rot: rpy_matrix(roll, pitch, yaw).transpose(),
            pos: Vec3::from(xyz),
        }
    }

    /// 6×6 matrix acting on motion vectors:
    ///
    /// ```text
    /// |  E      0 |
    /// | -E[p]×  E |
    /// ```
    pub fn to_motion_matrix(&self) -> Mat6 {
        let mut x = Mat6::zeros();
        x.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rot);
        x.fixed_view_mut::<3, 3>(3, 0)
            .copy_from(&(-self.rot * skew(&self.pos)));
        x.fixed_view_mut::<3, 3>(3, 3).copy_from(&self.rot);
        x
    }

    /// Motion vector from A coordinates to B coordinates.
    pub fn apply_motion(&self, m: &SpatialVec) -> SpatialVec {
        let w = m.angular();
        SpatialVec::new(
            self.rot * w,
            self.rot * (m.linear() - self.pos.cross(&w)),
        )
    }

    /// Force vector from B coordinates back to A coordinates.
    pub fn inv_apply_force(&self, f: &SpatialVec) -> SpatialVec {
        let et = self.rot.transpose();
        let force = et * f.linear();
        SpatialVec::new(et * f.angular() + self.pos.cross(&force), force)
    }

    /// [`inv_apply_force`](Self::inv_apply_force) on every column of a
    /// regressor block, i.e. `Xᵀ·K`.
    pub fn inv_apply_force_block(&self, block: &Mat6x10) -> Mat6x10 {
        self.to_motion_matrix().transpose() * block
    }

    /// `self ∘ other`: apply `other` first.
    pub fn compose(&self, other: &SpatialTransform) -> SpatialTransform {
        SpatialTransform {
            rot: self.rot * other.rot,
            pos: other.pos + other.rot.transpose() * self.pos,
        }
    }
}

/// Mass properties of one link.
///
/// Kept as mass, CoM and inertia about the CoM; [`to_parameters`] gives the
/// ten-parameter form identification works with.
///
/// [`to_parameters`]: SpatialInertia::to_parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialInertia {
    pub mass: f64,
    /// Center of mass in the body frame.
    pub com: Vec3,
    /// Rotational inertia about the center of mass.
    pub inertia: Mat3,
}

impl SpatialInertia {
    pub fn new(mass: f64, com: Vec3, inertia: Mat3) -> Self {
        Self { mass, com, inertia }
    }

    pub fn point_mass(mass: f64, pos: Vec3) -> Self {
        Self::new(mass, pos, Mat3::zeros())
    }

    /// Rotational inertia about the frame origin (parallel axis theorem).
    pub fn origin_inertia(&self) -> Mat3 {
        let c = skew(&self.com);
        self.inertia - c * c * self.mass
    }

    /// 6×6 spatial inertia about the frame origin.
    pub fn to_matrix(&self) -> Mat6 {
        let h = skew(&self.com) * self.mass;
        let mut m = Mat6::zeros();
        m.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&self.origin_inertia());
        m.fixed_view_mut::<3, 3>(0, 3).copy_from(&h);
        m.fixed_view_mut::<3, 3>(3, 0).copy_from(&h.transpose());
        m.fixed_view_mut::<3, 3>(3, 3)
            .copy_from(&Mat3::from_diagonal_element(self.mass));
        m
    }

    /// `[m, m·cx, m·cy, m·cz, Ixx, Ixy, Ixz, Iyy, Iyz, Izz]` about the origin.
    pub fn to_parameters(&self) -> Vec10 {
        let h = self.com * self.mass;
        let io = self.origin_inertia();
        Vec10::from_column_slice(&[
            self.mass,
            h.x,
            h.y,
            h.z,
            io[(0, 0)],
            io[(0, 1)],
            io[(0, 2)],
            io[(1, 1)],
            io[(1, 2)],
            io[(2, 2)],
        ])
    }
}

/// `L(w)` such that `I·w = L(w)·[Ixx, Ixy, Ixz, Iyy, Iyz, Izz]`.
fn inertia_dot(w: &Vec3) -> nalgebra::SMatrix<f64, 3, 6> {
    nalgebra::SMatrix::<f64, 3, 6>::from_row_slice(&[
        w.x, w.y, w.z, 0.0, 0.0, 0.0, //
        0.0, w.x, 0.0, w.y, w.z, 0.0, //
        0.0, 0.0, w.x, 0.0, w.y, w.z,
    ])
}

/// Single-body regressor `K(v, a)`.
///
/// With `v` and `a` the body's spatial velocity and acceleration in its own
/// frame, `I·a + v ×* (I·v) = K(v, a)·π` for the parameters `π` of any body.
pub fn inertial_regressor(vel: &SpatialVec, acc: &SpatialVec) -> Mat6x10 {
    let w = vel.angular();
    let dw = acc.angular();
    // Classical acceleration of the frame origin.
    let a_origin = acc.linear() + w.cross(&vel.linear());
    let wx = skew(&w);

    let mut k = Mat6x10::zeros();

    // Moment rows.
    k.fixed_view_mut::<3, 3>(0, 1)
        .copy_from(&(-skew(&a_origin)));
    k.fixed_view_mut::<3, 6>(0, 4)
        .copy_from(&(inertia_dot(&dw) + wx * inertia_dot(&w)));

    // Force rows.
    k.fixed_view_mut::<3, 1>(3, 0).copy_from(&a_origin);
    k.fixed_view_mut::<3, 3>(3, 1)
        .copy_from(&(skew(&dw) + wx * wx));

    k
}
