//! Unit tests for ts-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, AgentSlot, EdgeId, EdgeKey, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(AgentSlot::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn callsign_format() {
        assert_eq!(AgentId(17).callsign(), "D17");
    }

    #[test]
    fn edge_key_orders_by_endpoints_then_key() {
        let a = EdgeKey::new(NodeId(1), NodeId(2), 0);
        let b = EdgeKey::new(NodeId(1), NodeId(2), 1);
        let c = EdgeKey::new(NodeId(1), NodeId(3), 0);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.to_string(), "(1, 2, 0)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{bearing_and_distance, turn_angle, wrap_180, GeoPoint};

    const EPS: f64 = 1e-9;

    /// A spread of city-scale pairs around Vienna plus a few awkward ones.
    fn pairs() -> Vec<(GeoPoint, GeoPoint)> {
        vec![
            (GeoPoint::new(48.2082, 16.3738), GeoPoint::new(48.2100, 16.3800)),
            (GeoPoint::new(48.2082, 16.3738), GeoPoint::new(48.1990, 16.3600)),
            (GeoPoint::new(48.2000, 16.3700), GeoPoint::new(48.2000, 16.3900)),
            (GeoPoint::new(48.2000, 16.3700), GeoPoint::new(48.2150, 16.3700)),
            (GeoPoint::new(-33.86, 151.20), GeoPoint::new(-33.87, 151.21)),
            // Straddles the antimeridian.
            (GeoPoint::new(10.0, 179.999), GeoPoint::new(10.0, -179.999)),
        ]
    }

    #[test]
    fn zero_distance_and_zero_bearing_for_identical_points() {
        let p = GeoPoint::new(48.2082, 16.3738);
        let (brg, dist) = p.bearing_and_distance(p);
        assert_eq!(dist, 0.0);
        assert_eq!(brg, 0.0);
    }

    #[test]
    fn distance_is_symmetric_and_non_negative() {
        for (a, b) in pairs() {
            let ab = a.distance_m(b);
            let ba = b.distance_m(a);
            assert!(ab >= 0.0);
            assert!((ab - ba).abs() < 1e-6, "{a} {b}: {ab} vs {ba}");
        }
    }

    #[test]
    fn reverse_bearing_differs_by_180() {
        for (a, b) in pairs() {
            let fwd = a.bearing_deg(b);
            let back = b.bearing_deg(a);
            let diff = (fwd - back).rem_euclid(360.0);
            assert!((diff - 180.0).abs() < 1e-6, "{a} {b}: {fwd} vs {back}");
        }
    }

    #[test]
    fn bearings_in_range() {
        for (a, b) in pairs() {
            let brg = a.bearing_deg(b);
            assert!((0.0..360.0).contains(&brg), "bearing {brg} out of range");
        }
    }

    #[test]
    fn cardinal_bearings() {
        let o = GeoPoint::new(48.2, 16.37);
        assert!((o.bearing_deg(GeoPoint::new(48.21, 16.37)) - 0.0).abs() < EPS);
        assert!((o.bearing_deg(GeoPoint::new(48.2, 16.38)) - 90.0).abs() < EPS);
        assert!((o.bearing_deg(GeoPoint::new(48.19, 16.37)) - 180.0).abs() < EPS);
        assert!((o.bearing_deg(GeoPoint::new(48.2, 16.36)) - 270.0).abs() < EPS);
    }

    #[test]
    fn moved_inverts_bearing_and_distance() {
        let o = GeoPoint::new(48.2, 16.37);
        for brg in [0.0, 37.5, 90.0, 181.0, 300.0] {
            let p = o.moved(brg, 250.0);
            let (b, d) = o.bearing_and_distance(p);
            assert!((d - 250.0).abs() < 1e-6, "distance {d}");
            assert!(wrap_180(b - brg).abs() < 1e-9, "bearing {b} vs {brg}");
        }
        assert_eq!(o.moved(45.0, 0.0), o);
    }

    #[test]
    fn one_degree_latitude() {
        let (_, d) = bearing_and_distance(48.0, 16.0, 49.0, 16.0);
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn antimeridian_is_short() {
        let (_, d) = bearing_and_distance(0.0, 179.9995, 0.0, -179.9995);
        assert!(d < 200.0, "got {d}");
    }

    #[test]
    fn wrap_180_range() {
        assert_eq!(wrap_180(190.0), -170.0);
        assert_eq!(wrap_180(-190.0), 170.0);
        assert_eq!(wrap_180(180.0), -180.0);
        assert_eq!(wrap_180(3.0), 3.0);
    }

    #[test]
    fn turn_angle_reduces_into_0_180() {
        assert_eq!(turn_angle(10.0, 100.0), 90.0);
        assert_eq!(turn_angle(350.0, 10.0), 20.0);
        assert_eq!(turn_angle(0.0, 180.0), 180.0);
        assert_eq!(turn_angle(270.0, 90.0), 180.0);
        assert_eq!(turn_angle(45.0, 45.0), 0.0);
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn display_hms() {
        assert_eq!(SimTime(0.0).to_string(), "00:00:00");
        assert_eq!(SimTime(3_725.4).to_string(), "01:02:05");
        assert_eq!(SimTime::from_days(7.0).to_string(), "168:00:00");
    }

    #[test]
    fn parse_forms() {
        assert_eq!("01:02:05".parse::<SimTime>().unwrap(), SimTime(3_725.0));
        assert_eq!("00:00:00.50".parse::<SimTime>().unwrap(), SimTime(0.5));
        assert_eq!("100".parse::<SimTime>().unwrap(), SimTime(100.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("1:2".parse::<SimTime>().is_err());
        assert!("00:61:00".parse::<SimTime>().is_err());
        assert!("soon".parse::<SimTime>().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(12345);
        let mut b = SimRng::new(12345);
        let pool: Vec<u32> = (0..1000).collect();
        let xs: Vec<u32> = (0..8).map(|_| *a.choose(&pool).unwrap()).collect();
        let ys: Vec<u32> = (0..8).map(|_| *b.choose(&pool).unwrap()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn debug_hides_state() {
        assert_eq!(format!("{:?}", SimRng::new(7)), "SimRng");
    }

    #[test]
    fn choose_empty_is_none() {
        let mut r = SimRng::new(1);
        let empty: [u32; 0] = [];
        assert!(r.choose(&empty[..]).is_none());
        assert_eq!(r.choose(&[7][..]), Some(&7));
    }
}
