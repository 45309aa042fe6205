use std::fmt;

const NINETY: f64 = 90.0;
const ONE_EIGHTY: f64 = NINETY * 2.0;

/// Road-network node identifier (OSM-style numeric id).
pub type NodeId = u64;

/// Geographic position of a road-network node, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadNode {
    pub lat: f64,
    pub lng: f64,
}

impl RoadNode {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub(crate) fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-NINETY..=NINETY).contains(&self.lat)
            && (-ONE_EIGHTY..=ONE_EIGHTY).contains(&self.lng)
    }
}

impl fmt::Display for RoadNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "{},{}", b1.format(self.lat), b2.format(self.lng))
    }
}

#[cfg(test)]
mod tests {
    use super::RoadNode;

    #[test]
    fn valid_bounds_are_accepted() {
        assert!(RoadNode::new(-90.0, -180.0).is_valid());
        assert!(RoadNode::new(90.0, 180.0).is_valid());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(!RoadNode::new(91.0, 0.0).is_valid());
        assert!(!RoadNode::new(0.0, 181.0).is_valid());
        assert!(!RoadNode::new(f64::NAN, 0.0).is_valid());
        assert!(!RoadNode::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn display_formats_as_lat_lng() {
        let node = RoadNode::new(1.5, -2.25);
        assert_eq!(node.to_string(), "1.5,-2.25");
    }
}
