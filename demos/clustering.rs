//! k-medoids on a few random 2D blobs, printing every iteration.

use medoid::cluster::{ClusterObserver, Clusters, Dataset, Point, Session};
use rand::prelude::*;

struct Printer;

impl ClusterObserver for Printer {
    fn on_seeded(&mut self, pool: &[Point], clusters: &Clusters) {
        println!("=== seeded ===");
        print_clusters(pool, clusters);
    }

    fn on_reassigned(&mut self, pool: &[Point], clusters: &Clusters) {
        println!("=== medoids moved ===");
        print_clusters(pool, clusters);
    }

    fn on_converged(&mut self, _pool: &[Point], _clusters: &Clusters, n_iter: usize) {
        println!("=== converged after {} iterations ===", n_iter);
    }
}

fn print_clusters(pool: &[Point], clusters: &Clusters) {
    for (i, slot) in clusters.iter().enumerate() {
        let m = pool[slot.medoid];
        println!(
            "  cluster {} medoid ({:6.1}, {:6.1}) members {:3}",
            i,
            m.x,
            m.y,
            slot.members.len()
        );
    }
}

fn blob(rng: &mut StdRng, name: &str, centre: (f64, f64), spread: f64, n: usize) -> Dataset {
    let points = (0..n)
        .map(|_| {
            Point::new(
                centre.0 + rng.random_range(-spread..spread),
                centre.1 + rng.random_range(-spread..spread),
            )
        })
        .collect();
    Dataset::new(name, points)
}

fn main() -> Result<(), medoid::Error> {
    let mut rng = StdRng::seed_from_u64(42);

    let mut session = Session::new().with_seed(7).with_observer(Printer);
    session.add_dataset(blob(&mut rng, "A", (0.0, 0.0), 10.0, 30));
    session.add_dataset(blob(&mut rng, "B", (100.0, 20.0), 15.0, 30));
    session.add_dataset(blob(&mut rng, "C", (50.0, 90.0), 12.0, 30));

    for (name, points) in session.datasets() {
        println!("dataset {}: {} points", name, points.len());
    }

    session.seed_medoids(3)?;
    session.run_to_convergence()?;

    println!("total deviation: {:.1}", session.cost());
    for view in session.snapshot() {
        println!(
            "  medoid ({:6.1}, {:6.1}) with {} points",
            view.medoid.x,
            view.medoid.y,
            view.members.len()
        );
    }
    Ok(())
}
