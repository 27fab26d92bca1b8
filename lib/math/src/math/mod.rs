pub mod trig;
pub mod vector;

use self::vector::Vector3;

pub const PID: f64 = 3.1415926535897932384626433;
pub const PI: f32 = PID as f32;

pub fn lerp(a: &Vector3, b: &Vector3, amount: f32) -> Vector3 {
    *a + (*b - *a) * amount
}

pub fn dot(a: &Vector3, b: &Vector3) -> f32 {
    Vector3::dot(a, b)
}

pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    Vector3::cross(a, b)
}

pub fn length(v: &Vector3) -> f32 {
    (*v).length()
}

pub fn normalize(v: &Vector3) -> Vector3 {
    (*v).normalize()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lerp_at_zero_and_one_returns_endpoints() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        let b = Vector3::new(5.0, 5.0, 5.0);
        assert_eq!(lerp(&a, &b, 0.0), a);
        assert_eq!(lerp(&a, &b, 1.0), b);
    }

    #[test]
    fn cross_of_x_and_y_is_z() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(&x, &y), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn normalize_scales_to_unit_length() {
        let v = Vector3::new(3.0, 0.0, 4.0);
        assert!((length(&normalize(&v)) - 1.0).abs() < 1e-6);
    }
}
