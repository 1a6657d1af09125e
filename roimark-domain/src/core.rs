use image::GenericImageView;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// hit radius in display pixels for vertex grabbing
pub const HIT_TOLERANCE: TPtF = 5.0;

pub trait Calc:
    Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Sized
    + PartialOrd
    + From<u32>
    + Clone
    + Copy
{
}
impl<T> Calc for T where
    T: Add<Output = Self>
        + Sub<Output = Self>
        + Mul<Output = Self>
        + Div<Output = Self>
        + Sized
        + PartialOrd
        + From<u32>
        + Clone
        + Copy
{
}

fn unsigned_dist<T>(x1: T, x2: T) -> T
where
    T: Sub<Output = T> + PartialOrd,
{
    if x1 > x2 {
        x1 - x2
    } else {
        x2 - x1
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T>
where
    T: Calc,
{
    pub fn len_square(&self) -> T {
        self.x * self.x + self.y * self.y
    }
    pub fn dist_square(&self, other: &Self) -> T {
        <(T, T) as Into<Point<T>>>::into((
            // make this work also for unsigned types
            unsigned_dist(self.x, other.x),
            unsigned_dist(self.y, other.y),
        ))
        .len_square()
    }
    pub fn dot(&self, rhs: &Self) -> T {
        self.x * rhs.x + self.y * rhs.y
    }
}

impl<T> Mul<T> for Point<T>
where
    T: Calc,
{
    type Output = Self;
    fn mul(self, rhs: T) -> Self::Output {
        Point {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl<T> Div<T> for Point<T>
where
    T: Calc,
{
    type Output = Self;
    fn div(self, rhs: T) -> Self::Output {
        Point {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
impl<T> Sub for Point<T>
where
    T: Calc,
{
    type Output = Point<T>;
    fn sub(self, rhs: Self) -> Self::Output {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl<T> Add for Point<T>
where
    T: Calc,
{
    type Output = Point<T>;
    fn add(self, rhs: Self) -> Self::Output {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> From<(T, T)> for Point<T>
where
    T: Calc,
{
    fn from(value: (T, T)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}
impl<T> From<Point<T>> for (T, T)
where
    T: Calc,
{
    fn from(p: Point<T>) -> (T, T) {
        (p.x, p.y)
    }
}

pub type TPtF = f64;
pub type TPtI = u32;
pub type PtF = Point<TPtF>;
pub type PtI = Point<TPtI>;

impl PtF {
    /// Strict Euclidean proximity check, `< radius`. Pass
    /// [`HIT_TOLERANCE`](HIT_TOLERANCE) unless the caller needs its own
    /// radius.
    pub fn is_near(&self, other: PtF, radius: TPtF) -> bool {
        self.dist_square(&other).sqrt() < radius
    }
}

impl From<PtI> for PtF {
    fn from(p: PtI) -> Self {
        (f64::from(p.x), f64::from(p.y)).into()
    }
}
impl From<PtF> for PtI {
    fn from(p: PtF) -> Self {
        ((p.x as u32), (p.y as u32)).into()
    }
}
impl From<(u32, u32)> for PtF {
    fn from(x: (u32, u32)) -> Self {
        (f64::from(x.0), f64::from(x.1)).into()
    }
}
impl From<(i32, i32)> for PtF {
    fn from((x, y): (i32, i32)) -> Self {
        (f64::from(x), f64::from(y)).into()
    }
}
impl From<PtF> for (i32, i32) {
    fn from(p: PtF) -> Self {
        (p.x as i32, p.y as i32)
    }
}

pub type ShapeI = Shape<u32>;
pub type ShapeF = Shape<f64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Shape<T>
where
    T: Calc,
{
    pub w: T,
    pub h: T,
}
impl<T> Shape<T>
where
    T: Calc,
{
    pub fn new(w: T, h: T) -> Self {
        Self { w, h }
    }
}

impl ShapeI {
    pub fn from_im<I>(im: &I) -> Self
    where
        I: GenericImageView,
    {
        Self {
            w: im.width(),
            h: im.height(),
        }
    }
}

impl From<ShapeI> for ShapeF {
    fn from(value: ShapeI) -> Self {
        Self {
            w: f64::from(value.w),
            h: f64::from(value.h),
        }
    }
}
impl From<ShapeF> for ShapeI {
    fn from(value: ShapeF) -> Self {
        Self {
            w: value.w as u32,
            h: value.h as u32,
        }
    }
}
impl<T> From<(T, T)> for Shape<T>
where
    T: Calc,
{
    fn from(value: (T, T)) -> Self {
        Self {
            w: value.0,
            h: value.1,
        }
    }
}

#[test]
fn test_points() {
    let p1: PtF = (3.0, 4.0).into();
    let p2 = PtF { x: 0.0, y: 0.0 };
    assert_eq!(p1.dist_square(&p2), 25.0);
    assert_eq!(p1 + p2, p1);
    assert_eq!(p1 - p1, p2);
    assert_eq!(p1 * 2.0, PtF { x: 6.0, y: 8.0 });
    let pi: PtI = (10, 20).into();
    assert_eq!(pi, PtI { x: 10, y: 20 });
    let pf: PtF = pi.into();
    assert_eq!(pf, PtF { x: 10.0, y: 20.0 });
}

#[test]
fn test_is_near() {
    let p: PtF = (10.0, 10.0).into();
    assert!(p.is_near((12.0, 13.0).into(), HIT_TOLERANCE));
    // exactly on the radius is a miss
    assert!(!p.is_near((13.0, 14.0).into(), HIT_TOLERANCE));
    assert!(!p.is_near((20.0, 10.0).into(), HIT_TOLERANCE));
    assert!(p.is_near((20.0, 10.0).into(), 11.0));
}
