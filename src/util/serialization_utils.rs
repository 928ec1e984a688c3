use glam::f32::Vec3;
use glam::f64::DVec3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes a DVec3 position as a plain `[x, y, z]` array
pub mod dvec3_serializer {
    use super::*;

    pub fn serialize<S>(vec: &DVec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (vec.x, vec.y, vec.z).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DVec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, y, z) = <(f64, f64, f64)>::deserialize(deserializer)?;
        Ok(DVec3::new(x, y, z))
    }
}

/// Serializes a list of DVec3 positions as a list of `[x, y, z]` arrays
pub mod vec_dvec3_serializer {
    use super::*;

    pub fn serialize<S>(positions: &Vec<DVec3>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let tuples: Vec<(f64, f64, f64)> =
            positions.iter().map(|v| (v.x, v.y, v.z)).collect();
        tuples.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<DVec3>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tuples = <Vec<(f64, f64, f64)>>::deserialize(deserializer)?;
        Ok(tuples
            .into_iter()
            .map(|(x, y, z)| DVec3::new(x, y, z))
            .collect())
    }
}

/// Serializes an f32 Vec3 color as an `[r, g, b]` array
pub mod vec3_serializer {
    use super::*;

    pub fn serialize<S>(color: &Vec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (color.x, color.y, color.z).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (r, g, b) = <(f32, f32, f32)>::deserialize(deserializer)?;
        Ok(Vec3::new(r, g, b))
    }
}
