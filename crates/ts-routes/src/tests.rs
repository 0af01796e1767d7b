//! Unit tests for ts-routes.

#[cfg(test)]
mod helpers {
    use ts_core::{GeoPoint, NodeId};
    use ts_graph::{StreetGraph, StreetGraphBuilder};

    pub fn toward(p: GeoPoint, bearing_deg: f64, dist_m: f64) -> GeoPoint {
        p.moved(bearing_deg, dist_m)
    }

    pub const ORIGIN: GeoPoint = GeoPoint { lat: 48.2, lon: 16.37 };

    /// ```text
    ///          n2
    ///          │
    ///   n0 ─── n1 ─── n3        (800 m segments)
    ///
    ///   n4 (isolated, 2 km south of n0)
    /// ```
    pub fn corner_city() -> (StreetGraph, [NodeId; 5]) {
        let p0 = ORIGIN;
        let p1 = toward(p0, 90.0, 800.0);
        let p2 = toward(p1, 0.0, 800.0);
        let p3 = toward(p1, 90.0, 800.0);
        let p4 = toward(p0, 180.0, 2_000.0);

        let mut b = StreetGraphBuilder::new();
        let n0 = b.add_node(10, p0);
        let n1 = b.add_node(11, p1);
        let n2 = b.add_node(12, p2);
        let n3 = b.add_node(13, p3);
        let n4 = b.add_node(14, p4);
        b.add_street(n0, n1, Some(1));
        b.add_street(n1, n2, Some(2));
        b.add_street(n1, n3, Some(1));
        (b.build(), [n0, n1, n2, n3, n4])
    }

    /// `side × side` lattice with `spacing_m` between neighbours; no edges.
    pub fn lattice(side: usize, spacing_m: f64) -> StreetGraph {
        let mut b = StreetGraphBuilder::new();
        let mut row_start = ORIGIN;
        for r in 0..side {
            let mut p = row_start;
            for c in 0..side {
                b.add_node((r * side + c) as u64, p);
                p = toward(p, 90.0, spacing_m);
            }
            row_start = toward(row_start, 0.0, spacing_m);
        }
        b.build()
    }
}

// ── Turn classification ───────────────────────────────────────────────────────

#[cfg(test)]
mod turns {
    use super::helpers::{toward, ORIGIN};
    use crate::{classify_turns, TURN_THRESHOLD_DEG};

    fn three_points(turn_deg: f64) -> Vec<bool> {
        let a = ORIGIN;
        let b = toward(a, 10.0, 50.0);
        let c = toward(b, 10.0 + turn_deg, 50.0);
        classify_turns(&[a, b, c])
    }

    #[test]
    fn endpoints_always_turn() {
        assert_eq!(three_points(0.0), vec![true, false, true]);
        let a = ORIGIN;
        assert_eq!(classify_turns(&[a, toward(a, 0.0, 10.0)]), vec![true, true]);
    }

    #[test]
    fn right_angle_is_turn() {
        assert_eq!(three_points(90.0)[1], true);
        assert_eq!(three_points(-90.0)[1], true);
    }

    #[test]
    fn straight_is_flyby() {
        assert_eq!(three_points(0.0)[1], false);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!(25.0 > TURN_THRESHOLD_DEG));
        assert_eq!(three_points(24.99)[1], false);
        assert_eq!(three_points(-24.99)[1], false);
        assert_eq!(three_points(25.01)[1], true);
    }

    #[test]
    fn wraparound_bearings() {
        // 350° → 20° is a 30° change, not 330°.
        let a = ORIGIN;
        let b = toward(a, 350.0, 50.0);
        let c = toward(b, 20.0, 50.0);
        assert_eq!(classify_turns(&[a, b, c])[1], true);

        let c = toward(b, 5.0, 50.0);
        assert_eq!(classify_turns(&[a, b, c])[1], false);
    }

    #[test]
    fn empty_and_single() {
        assert!(classify_turns(&[]).is_empty());
        assert_eq!(classify_turns(&[ORIGIN]), vec![true]);
    }
}

// ── RouteBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ts_core::EdgeKey;
    use ts_graph::{DijkstraRouter, GraphError};
    use crate::{RouteBuilder, RoutesError};

    #[test]
    fn corner_route() {
        let (g, [n0, n1, n2, ..]) = super::helpers::corner_city();
        let route = RouteBuilder::new(&g, DijkstraRouter).build(n0, n2).unwrap().unwrap();

        assert_eq!(route.origin, n0);
        assert_eq!(route.destination, n2);
        assert_eq!(route.len(), 3);
        assert_eq!(route.waypoints.iter().map(|w| w.turn).collect::<Vec<_>>(), vec![true, true, true]);

        let e01 = EdgeKey::new(n0, n1, 0);
        let e12 = EdgeKey::new(n1, n2, 0);
        assert_eq!(route.edges().collect::<Vec<_>>(), vec![e01, e01, e12]);
        assert!((route.initial_heading().unwrap() - 90.0).abs() < 1e-6);
    }

    #[test]
    fn straight_through_is_flyby() {
        let (g, [n0, _, _, n3, _]) = super::helpers::corner_city();
        let route = RouteBuilder::new(&g, DijkstraRouter).build(n0, n3).unwrap().unwrap();
        assert_eq!(route.waypoints.iter().map(|w| w.turn).collect::<Vec<_>>(), vec![true, false, true]);
        assert_eq!(route.turn_count(), 2);
    }

    #[test]
    fn edge_tags_lie_on_path() {
        let (g, [n0, _, n2, ..]) = super::helpers::corner_city();
        let route = RouteBuilder::new(&g, DijkstraRouter).build(n0, n2).unwrap().unwrap();
        for (i, wp) in route.waypoints.iter().enumerate() {
            let e = g.edge_id(wp.edge).expect("tag names a graph edge");
            assert!(g.edge_geometry(e).contains(&wp.pos), "waypoint {i} not on its edge");
        }
        assert_eq!(route.waypoints.first().unwrap().pos, g.node_pos[n0.index()]);
        assert_eq!(route.waypoints.last().unwrap().pos, g.node_pos[n2.index()]);
    }

    #[test]
    fn short_pair_is_not_built() {
        let (g, [n0, n1, ..]) = super::helpers::corner_city();
        assert!(RouteBuilder::new(&g, DijkstraRouter).build(n0, n1).unwrap().is_none());
        assert!(RouteBuilder::new(&g, DijkstraRouter).with_min_mission(500.0).build(n0, n1).unwrap().is_some());
    }

    #[test]
    fn unreachable_is_error() {
        let (g, [n0, _, _, _, n4]) = super::helpers::corner_city();
        let res = RouteBuilder::new(&g, DijkstraRouter).build(n0, n4);
        assert!(matches!(res, Err(RoutesError::Graph(GraphError::NoPath { .. }))));
    }

    #[test]
    fn same_node_below_any_positive_minimum() {
        let (g, [n0, ..]) = super::helpers::corner_city();
        assert!(RouteBuilder::new(&g, DijkstraRouter).build(n0, n0).unwrap().is_none());
    }

    #[test]
    fn same_node_without_minimum_is_degenerate() {
        let (g, [n0, ..]) = super::helpers::corner_city();
        let res = RouteBuilder::new(&g, DijkstraRouter).with_min_mission(0.0).build(n0, n0);
        assert!(matches!(res, Err(RoutesError::DegenerateRoute { points: 0, .. })));
    }
}

// ── Origin selection ──────────────────────────────────────────────────────────

#[cfg(test)]
mod origins {
    use ts_core::{NodeId, SimRng};
    use crate::{destinations, OriginSelector};

    #[test]
    fn accepted_origins_are_separated() {
        let g = super::helpers::lattice(12, 100.0);
        let sel = OriginSelector::default();
        let picked = sel.select(&g, &mut SimRng::new(0));
        assert!(!picked.is_empty());
        assert!(picked.len() <= sel.count);
        for (i, a) in picked.iter().enumerate() {
            for b in &picked[i + 1..] {
                let d = g.node_pos[a.index()].distance_m(g.node_pos[b.index()]);
                assert!(d >= sel.min_separation_m, "{a} and {b} only {d:.1} m apart");
            }
        }
    }

    #[test]
    fn count_caps_result() {
        let g = super::helpers::lattice(10, 500.0);
        let sel = OriginSelector { count: 3, ..OriginSelector::default() };
        assert_eq!(sel.select(&g, &mut SimRng::new(4)).len(), 3);
    }

    #[test]
    fn duplicate_rejected_even_without_separation() {
        let g = super::helpers::lattice(1, 100.0);
        let sel = OriginSelector { count: 5, min_separation_m: 0.0, max_attempts: 10 };
        assert_eq!(sel.select(&g, &mut SimRng::new(1)), vec![NodeId(0)]);
    }

    #[test]
    fn deterministic_for_seed() {
        let g = super::helpers::lattice(8, 150.0);
        let sel = OriginSelector::default();
        assert_eq!(sel.select(&g, &mut SimRng::new(9)), sel.select(&g, &mut SimRng::new(9)));
    }

    #[test]
    fn pool_restricts_candidates() {
        let g = super::helpers::lattice(6, 400.0);
        let pool = [NodeId(0), NodeId(5), NodeId(30), NodeId(35), NodeId(999)];
        let picked = OriginSelector::default().select_from(&g, &pool, &mut SimRng::new(2));
        assert!(picked.iter().all(|n| pool[..4].contains(n)));
        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn empty_pool() {
        let g = super::helpers::lattice(3, 400.0);
        assert!(OriginSelector::default().select_from(&g, &[], &mut SimRng::new(0)).is_empty());
    }

    #[test]
    fn destinations_are_complement() {
        let all: Vec<NodeId> = (0..6).map(NodeId).collect();
        let dest = destinations(&all, &[NodeId(1), NodeId(4)]);
        assert_eq!(dest, vec![NodeId(0), NodeId(2), NodeId(3), NodeId(5)]);
    }
}

// ── RouteCache ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use ts_core::{GeoPoint, NodeId, SimRng};
    use ts_graph::{DijkstraRouter, StreetGraph, StreetGraphBuilder};
    use crate::{BuildReport, RouteBuilder, RouteCache, RoutesError};

    fn built() -> (StreetGraph, RouteCache, BuildReport, [NodeId; 5]) {
        let (g, nodes @ [n0, n1, n2, n3, n4]) = super::helpers::corner_city();
        let mut cache = RouteCache::new();
        let report = cache
            .build_all(&RouteBuilder::new(&g, DijkstraRouter), &[n0], &[n1, n2, n3, n4], Some(2))
            .unwrap();
        (g, cache, report, nodes)
    }

    /// Same streets as `corner_city`, nodes added in reverse order.
    fn corner_city_reversed() -> StreetGraph {
        let (g, _) = super::helpers::corner_city();
        let mut b = StreetGraphBuilder::new();
        let mut ids = vec![NodeId(0); g.node_count()];
        for n in g.nodes().collect::<Vec<_>>().into_iter().rev() {
            ids[n.index()] = b.add_node(g.node_osm_id[n.index()], g.node_pos[n.index()]);
        }
        for (a, c, stroke) in [(0, 1, Some(1)), (1, 2, Some(2)), (1, 3, Some(1))] {
            b.add_street(ids[a], ids[c], stroke);
        }
        b.build()
    }

    #[test]
    fn report_counts_outcomes() {
        let (_, cache, report, [n0, n1, n2, n3, n4]) = built();
        assert_eq!(report, BuildReport { built: 2, skipped_short: 1, failed: 1, already_cached: 0 });
        assert_eq!(report.pairs(), 4);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(n0, n2));
        assert!(cache.contains(n0, n3));
        assert!(!cache.contains(n0, n1));
        assert!(!cache.contains(n0, n4));
        assert_eq!(cache.origins(), &[n0]);
        assert_eq!(cache.destinations_of(n0), &[n2, n3]);
        assert!(cache.destinations_of(n1).is_empty());
    }

    #[test]
    fn second_build_changes_nothing() {
        let (g, [n0, n1, n2, n3, n4]) = super::helpers::corner_city();
        let builder = RouteBuilder::new(&g, DijkstraRouter);
        let mut cache = RouteCache::new();
        cache.build_all(&builder, &[n0], &[n1, n2, n3, n4], None).unwrap();
        let before: Vec<_> = cache.iter().cloned().collect();

        let again = cache.build_all(&builder, &[n0], &[n1, n2, n3, n4], None).unwrap();
        assert_eq!(again.built, 0);
        assert_eq!(again.already_cached, 2);
        assert_eq!(cache.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn insert_is_write_once() {
        let (_, mut cache, _, [n0, _, n2, ..]) = built();
        let mut altered = cache.get(n0, n2).unwrap().clone();
        altered.waypoints.truncate(2);
        assert!(!cache.insert(altered));
        assert_eq!(cache.get(n0, n2).unwrap().len(), 3);
    }

    #[test]
    fn sample_hits_cached_pairs() {
        let (_, cache, _, _) = built();
        let mut rng = SimRng::new(12345);
        for _ in 0..20 {
            let (o, d) = cache.sample(&mut rng).unwrap();
            assert!(cache.get(o, d).is_some());
        }
        assert!(RouteCache::new().sample(&mut rng).is_none());
    }

    #[test]
    fn chunked_build_checkpoints_each_chunk() {
        let (g, [n0, n1, n2, n3, _]) = super::helpers::corner_city();
        let builder = RouteBuilder::new(&g, DijkstraRouter);
        let all = [n0, n1, n2, n3];

        let mut whole = RouteCache::new();
        whole.build_all(&builder, &all, &all, Some(1)).unwrap();

        let mut sizes = Vec::new();
        let mut chunked = RouteCache::new();
        let report = chunked
            .build_in_chunks(&builder, &all, &all, Some(1), 1, |c| {
                sizes.push(c.len());
                Ok(())
            })
            .unwrap();

        assert_eq!(report.built, whole.len());
        assert_eq!(*sizes.last().unwrap(), whole.len());
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        assert!(sizes.len() > 1);
        assert!(chunked.iter().eq(whole.iter()));
    }

    #[test]
    fn interrupted_build_resumes_from_checkpoint() {
        let (g, [n0, n1, n2, n3, _]) = super::helpers::corner_city();
        let builder = RouteBuilder::new(&g, DijkstraRouter);
        let all = [n0, n1, n2, n3];
        let dir = tempfile::tempdir().expect("create temp dir");

        // Abort after the first saved chunk.
        let mut saves = 0;
        let mut first_run = RouteCache::new();
        let aborted = first_run.build_in_chunks(&builder, &all, &all, Some(1), 1, |c| {
            c.save(dir.path(), &g)?;
            saves += 1;
            if saves == 1 {
                Err(RoutesError::Io(std::io::Error::other("interrupted")))
            } else {
                Ok(())
            }
        });
        assert!(aborted.is_err());

        let mut resumed = RouteCache::load(dir.path(), &g).unwrap();
        let kept = resumed.len();
        assert!(kept > 0);
        let report = resumed.build_all(&builder, &all, &all, Some(1)).unwrap();
        assert_eq!(report.already_cached, kept);

        let mut fresh = RouteCache::new();
        fresh.build_all(&builder, &all, &all, Some(1)).unwrap();
        assert!(resumed.iter().eq(fresh.iter()));
    }

    #[test]
    fn save_then_load() {
        let (g, cache, _, _) = built();
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(!RouteCache::exists(dir.path()));
        cache.save(dir.path(), &g).unwrap();
        assert!(RouteCache::exists(dir.path()));

        let loaded = RouteCache::load(dir.path(), &g).unwrap();
        assert_eq!(loaded.len(), cache.len());
        assert_eq!(loaded.origins(), cache.origins());
        assert!(loaded.iter().eq(cache.iter()));
    }

    #[test]
    fn load_follows_external_node_ids() {
        let (g, cache, _, [n0, _, n2, ..]) = built();
        let dir = tempfile::tempdir().expect("create temp dir");
        cache.save(dir.path(), &g).unwrap();

        let reordered = corner_city_reversed();
        let loaded = RouteCache::load(dir.path(), &reordered).unwrap();
        assert_eq!(loaded.len(), cache.len());

        let o = reordered.node_by_osm_id(g.node_osm_id[n0.index()]).unwrap();
        let d = reordered.node_by_osm_id(g.node_osm_id[n2.index()]).unwrap();
        assert_ne!(o, n0);
        let route = loaded.get(o, d).unwrap();
        assert_eq!(route.waypoints.first().unwrap().pos, reordered.node_pos[o.index()]);
        assert_eq!(route.waypoints.last().unwrap().pos, reordered.node_pos[d.index()]);
        for edge in route.edges() {
            assert!(reordered.edge_id(edge).is_some());
        }
        assert_eq!(loaded.destinations_of(o).len(), 2);
    }

    #[test]
    fn load_rejects_unknown_nodes() {
        let (g, cache, _, _) = built();
        let dir = tempfile::tempdir().expect("create temp dir");
        cache.save(dir.path(), &g).unwrap();

        let mut b = StreetGraphBuilder::new();
        b.add_node(10, GeoPoint::new(48.2, 16.37));
        let other = b.build();
        assert!(matches!(RouteCache::load(dir.path(), &other), Err(RoutesError::GraphMismatch(_))));
    }

    #[test]
    fn load_rejects_moved_nodes() {
        let (g, cache, _, _) = built();
        let dir = tempfile::tempdir().expect("create temp dir");
        cache.save(dir.path(), &g).unwrap();

        // Same ids and streets, n0 shifted 50 m west.
        let mut b = StreetGraphBuilder::new();
        let ids: Vec<NodeId> = g
            .nodes()
            .map(|n| {
                let pos = g.node_pos[n.index()];
                let pos = if n.index() == 0 { pos.moved(270.0, 50.0) } else { pos };
                b.add_node(g.node_osm_id[n.index()], pos)
            })
            .collect();
        for (a, c, stroke) in [(0, 1, Some(1)), (1, 2, Some(2)), (1, 3, Some(1))] {
            b.add_street(ids[a], ids[c], stroke);
        }
        let moved = b.build();
        assert!(matches!(RouteCache::load(dir.path(), &moved), Err(RoutesError::GraphMismatch(_))));
    }

    #[test]
    fn mismatched_index_is_corrupt() {
        let (g, cache, _, [n0, _, n2, ..]) = built();
        let dir = tempfile::tempdir().expect("create temp dir");
        cache.save(dir.path(), &g).unwrap();

        let mut smaller = RouteCache::new();
        smaller.insert(cache.get(n0, n2).unwrap().clone());
        let other = tempfile::tempdir().expect("create temp dir");
        smaller.save(other.path(), &g).unwrap();
        std::fs::copy(other.path().join("index.bin"), dir.path().join("index.bin")).unwrap();

        assert!(matches!(RouteCache::load(dir.path(), &g), Err(RoutesError::CorruptIndex(_))));
    }

    #[test]
    fn missing_files_are_io_errors() {
        let (g, _) = super::helpers::corner_city();
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(matches!(RouteCache::load(dir.path(), &g), Err(RoutesError::Io(_))));
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::CacheBuildConfig;

    #[test]
    fn defaults() {
        let c = CacheBuildConfig::default();
        assert_eq!(c.origin_count, 200);
        assert_eq!(c.min_separation_m, 300.0);
        assert_eq!(c.max_attempts, 100);
        assert_eq!(c.min_mission_m, 1_000.0);
        assert_eq!(c.workers, None);
        assert_eq!(c.checkpoint_every, 10);
    }

    #[test]
    fn partial_toml() {
        let c = CacheBuildConfig::from_toml_str("origin_count = 12\nworkers = 8\n").unwrap();
        assert_eq!(c.origin_count, 12);
        assert_eq!(c.workers, Some(8));
        assert_eq!(c.selector().min_separation_m, 300.0);
    }

    #[test]
    fn bad_toml() {
        assert!(CacheBuildConfig::from_toml_str("origin_count = \"many\"").is_err());
    }
}
