use arborgrid::{Analysis, BoundingBox, CoverageConfig, CoverageMethod, Element, Ellipsoid, SamplingGrid, Tree};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    // Initialize Rayon explicitly so thread creation happens before the heavy calculation.
    rayon::ThreadPoolBuilder::new().build_global().unwrap();

    let ellipsoid = Ellipsoid::from_volume(428.0, 2.25, 1.2).unwrap();
    let [a, b, c] = ellipsoid.radii();

    // A symmetric binary tree rising from below the organ, 12 generations deep.
    let mut nodes = vec![[0.0, 0.0, -c], [0.0, 0.0, -c * 0.5]];
    let mut elements = vec![Element::new(0, 1)];
    let mut frontier = vec![(1, a * 0.5, b * 0.5)];
    for generation in 0..12 {
        let mut next = Vec::with_capacity(frontier.len() * 2);
        for (parent, dx, dy) in frontier {
            let p: [f64; 3] = nodes[parent];
            let dz = c / 16.0;
            let (cx, cy) = if generation % 2 == 0 { (dx, 0.0) } else { (0.0, dy) };
            for sign in [-1.0, 1.0] {
                nodes.push([p[0] + sign * cx, p[1] + sign * cy, p[2] + dz]);
                elements.push(Element::new(parent, nodes.len() - 1));
                let (nx, ny) = if generation % 2 == 0 { (dx * 0.5, dy) } else { (dx, dy * 0.5) };
                next.push((nodes.len() - 1, nx, ny));
            }
        }
        frontier = next;
    }
    let tree = Tree::new(nodes, elements).unwrap();

    let bounds = BoundingBox::new([-a, -b, -c], [a, b, c]);
    let grid = SamplingGrid::rectangular(bounds, [30, 30, 8]).unwrap();

    let mut analysis = Analysis::new(tree, grid);
    analysis.set_ellipsoid(ellipsoid);
    analysis.set_coverage(CoverageConfig::default().with_method(CoverageMethod::Summing).with_samples_per_axis(16));
    analysis.calculate().unwrap();

    let enclosed: f64 = analysis.enclosed_volumes().iter().sum();
    let counted: usize = analysis.terminal_counts.iter().sum();
    println!(
        "terminals: {} ({} in grid), enclosed volume {:.3} of {:.3}",
        analysis.terminals.count(),
        counted,
        enclosed,
        ellipsoid.volume()
    );
}
