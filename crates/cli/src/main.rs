use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lightscene::graph::{EdgeKey, Graph, GraphCfg, GraphUpdate, NodeKey};
use lightscene::light::{DirectionalLightField, LightCfg, RadialLightField, Screen, ShadowCfg};
use lightscene::scene::{RotateScreen, Scene, ScreenTracker, Scheduler};
use lightscene::Vec2;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;

use provenance::{write_artifact, Payload};

#[derive(Parser)]
#[command(name = "lightscene-cli")]
#[command(about = "Export light, screen and graph scenes as JSON shape lists")]
struct Cmd {
    /// Optional run tag; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Tessellate a radial light and write its annuli
    Ambient(AmbientArgs),
    /// Rotate a screen in front of a tracked spotlight and write every frame
    Spotlight(SpotlightArgs),
    /// Build a graph from JSON, apply labels and parent edges, write styles
    Graph {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct AmbientArgs {
    #[arg(long, default_value_t = 5.0)]
    radius: f64,
    #[arg(long, default_value_t = 10)]
    levels: usize,
    #[arg(long, default_value_t = 1.0)]
    intensity: f64,
    #[arg(long, default_value_t = 0.0)]
    x: f64,
    #[arg(long, default_value_t = 0.0)]
    y: f64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Clone, Debug)]
struct SpotlightArgs {
    #[arg(long, default_value_t = 60)]
    frames: usize,
    /// Total screen rotation in radians
    #[arg(long, default_value_t = std::f64::consts::FRAC_PI_2)]
    angle: f64,
    /// Distance from the source to the screen centre
    #[arg(long, default_value_t = 3.0)]
    distance: f64,
    #[arg(long, default_value_t = 1.0)]
    half_length: f64,
    #[arg(long, default_value_t = 10)]
    levels: usize,
    #[arg(long)]
    out: PathBuf,
}

/// Graph description read by `graph`.
#[derive(Deserialize, Debug)]
struct GraphInput {
    #[serde(default)]
    directed: bool,
    nodes: Vec<[f64; 3]>,
    #[serde(default)]
    edges: Vec<([f64; 3], [f64; 3])>,
    #[serde(default)]
    labels: Vec<LabelInput>,
    #[serde(default)]
    parents: Vec<ParentInput>,
}

#[derive(Deserialize, Debug)]
struct LabelInput {
    node: [f64; 3],
    name: String,
    text: String,
}

#[derive(Deserialize, Debug)]
struct ParentInput {
    node: [f64; 3],
    edge: ([f64; 3], [f64; 3]),
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Ambient(args) => ambient(args, cmd.tag),
        Action::Spotlight(args) => spotlight(args, cmd.tag),
        Action::Graph { input, out } => graph(input, out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn ambient(args: AmbientArgs, tag: Option<String>) -> Result<()> {
    tracing::info!(
        radius = args.radius,
        levels = args.levels,
        out = %args.out.display(),
        "ambient"
    );
    let doc = ambient_doc(&args)?;
    let params = json!({
        "tag": tag,
        "radius": args.radius,
        "levels": args.levels,
        "intensity": args.intensity,
        "source": [args.x, args.y],
    });
    write_artifact(&args.out, &doc, Payload::new("ambient", params))?;
    Ok(())
}

fn ambient_doc(args: &AmbientArgs) -> Result<Value> {
    let mut light = RadialLightField::new(LightCfg {
        source: Vec2::new(args.x, args.y),
        radius: args.radius,
        num_levels: args.levels,
        ..LightCfg::ambient()
    })
    .context("building ambient light")?;
    light
        .set_intensity_scale(args.intensity)
        .context("scaling ambient light")?;
    Ok(json!({
        "source": [args.x, args.y],
        "intensity": light.intensity(),
        "shapes": export::shapes(&light.shapes()),
    }))
}

fn spotlight(args: SpotlightArgs, tag: Option<String>) -> Result<()> {
    tracing::info!(
        frames = args.frames,
        angle = args.angle,
        out = %args.out.display(),
        "spotlight"
    );
    let doc = spotlight_doc(&args)?;
    let params = json!({
        "tag": tag,
        "frames": args.frames,
        "angle": args.angle,
        "distance": args.distance,
        "half_length": args.half_length,
        "levels": args.levels,
    });
    write_artifact(&args.out, &doc, Payload::new("spotlight", params))?;
    Ok(())
}

fn spotlight_doc(args: &SpotlightArgs) -> Result<Value> {
    let mut scene = Scene::new();
    let screen = scene.add_screen(Screen::segment(
        Vec2::new(args.distance, -args.half_length),
        Vec2::new(args.distance, args.half_length),
    ));
    let light = DirectionalLightField::new(
        LightCfg {
            num_levels: args.levels,
            ..LightCfg::spotlight()
        },
        ShadowCfg::default(),
    )
    .context("building spotlight")?;
    let spot = scene.add_spotlight(light, Some(screen));
    let mut sched = Scheduler::new();
    sched.add(ScreenTracker::new(spot));

    let dt = 1.0 / 60.0;
    let run_time = args.frames as f64 * dt;
    let mut frames = Vec::with_capacity(args.frames);
    let n = sched.play(
        &mut scene,
        vec![Box::new(RotateScreen::new(screen, args.angle))],
        run_time,
        dt,
        |scene, time| {
            let Some(light) = scene.spotlight(spot) else {
                return;
            };
            frames.push(json!({
                "time": time,
                "opening_angle": scene.opening_angle(spot),
                "wedge": light.wedge().map(|(start, span)| [start, span]),
                "shadow": light
                    .shadow()
                    .map(|p| export::shape(&lightscene::geom::Shape::Polygon(p.clone()))),
            }));
        },
    );
    tracing::debug!(frames = n, "spotlight frames rendered");
    Ok(json!({ "frames": frames }))
}

fn graph(input: PathBuf, out: PathBuf, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "graph");
    let raw = std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
    let desc: GraphInput =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", input.display()))?;
    let doc = graph_doc(&desc)?;
    let params = json!({
        "tag": tag,
        "input": input.to_string_lossy(),
        "nodes": desc.nodes.len(),
        "edges": desc.edges.len(),
        "labels": desc.labels.len(),
    });
    write_artifact(&out, &doc, Payload::new("graph", params))?;
    Ok(())
}

fn graph_doc(desc: &GraphInput) -> Result<Value> {
    let cfg = GraphCfg {
        directed: desc.directed,
        ..GraphCfg::default()
    };
    let mut g: Graph<String> = Graph::new(&desc.nodes, &desc.edges, cfg).context("building graph")?;

    let mut labels = Vec::with_capacity(desc.labels.len());
    for l in &desc.labels {
        labels.push((NodeKey::new(l.node)?, l.name.clone(), l.text.clone()));
    }
    let mut update: GraphUpdate<String> = g.set_node_labels(labels).context("applying labels")?;
    for p in &desc.parents {
        let node = NodeKey::new(p.node)?;
        let edge = EdgeKey::new(NodeKey::new(p.edge.0)?, NodeKey::new(p.edge.1)?);
        update.merge(g.set_parent_edge(node, edge).context("setting parent edge")?);
    }
    tracing::info!(
        restyled_nodes = update.nodes.len(),
        restyled_edges = update.edges.len(),
        "graph updates applied"
    );

    let mut nodes = Vec::with_capacity(g.node_count());
    for k in g.nodes() {
        let node = g.node(k)?;
        nodes.push(json!({
            "key": export::node_key(k),
            "labels": node.labels,
            "style": export::node_style(&g.node_style(k)?),
        }));
    }
    let mut edges = Vec::with_capacity(g.edge_count());
    for e in g.edges() {
        edges.push(json!({
            "from": export::node_key(e.from),
            "to": export::node_key(e.to),
            "style": export::edge_style(&g.edge_style(e)?),
        }));
    }
    Ok(json!({
        "nodes": nodes,
        "edges": edges,
        "restyled": {
            "nodes": update.node_keys().into_iter().map(export::node_key).collect::<Vec<_>>(),
            "edges": update.edges.len(),
        },
    }))
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "lib_version": lightscene::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn spot_args(out: PathBuf) -> SpotlightArgs {
        SpotlightArgs {
            frames: 12,
            angle: 0.5,
            distance: 3.0,
            half_length: 1.0,
            levels: 4,
            out,
        }
    }

    #[test]
    fn graph_labels_restyle_one_node() {
        let desc: GraphInput = serde_json::from_value(json!({
            "nodes": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            "edges": [[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]],
            "labels": [{"node": [0.0, 0.0, 0.0], "name": "dist", "text": "5"}]
        }))
        .unwrap();
        let doc = graph_doc(&desc).unwrap();
        assert_eq!(doc["restyled"]["nodes"], json!([[0.0, 0.0, 0.0]]));
        assert_eq!(doc["restyled"]["edges"], 1);
        assert_eq!(doc["nodes"][0]["labels"]["dist"], "5");
        assert_eq!(doc["nodes"][0]["style"]["enlarged"], true);
        assert_eq!(doc["nodes"][1]["style"]["enlarged"], false);
    }

    #[test]
    fn graph_rejects_dangling_edge() {
        let desc: GraphInput = serde_json::from_value(json!({
            "nodes": [[0.0, 0.0, 0.0]],
            "edges": [[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]]
        }))
        .unwrap();
        let err = graph_doc(&desc).unwrap_err();
        assert!(format!("{err:#}").contains("node not found"));
    }

    #[test]
    fn graph_parent_edge_is_highlighted() {
        let desc: GraphInput = serde_json::from_value(json!({
            "nodes": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            "edges": [[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]],
            "parents": [{"node": [1.0, 0.0, 0.0], "edge": [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]}]
        }))
        .unwrap();
        let doc = graph_doc(&desc).unwrap();
        assert_eq!(doc["edges"][0]["style"]["highlighted"], true);
    }

    #[test]
    fn graph_draws_opposite_edges_bowed() {
        let desc: GraphInput = serde_json::from_value(json!({
            "nodes": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            "edges": [
                [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
                [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]
            ]
        }))
        .unwrap();
        let doc = graph_doc(&desc).unwrap();
        assert_eq!(doc["edges"][0]["style"]["curved"], true);
        assert_eq!(doc["edges"][1]["style"]["curved"], true);
    }

    #[test]
    fn spotlight_writes_every_frame() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("spot.json");
        let args = spot_args(out.clone());
        spotlight(args, Some("t".into())).unwrap();
        let doc: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        let frames = doc["frames"].as_array().unwrap();
        assert_eq!(frames.len(), 12);
        assert!(frames.iter().all(|f| f["shadow"]["kind"] == "polygon"));
        assert!(dir.path().join("spot.provenance.json").exists());
    }

    #[test]
    fn ambient_rejects_bad_radius() {
        let dir = tempdir().unwrap();
        let args = AmbientArgs {
            radius: -1.0,
            levels: 3,
            intensity: 1.0,
            x: 0.0,
            y: 0.0,
            out: dir.path().join("a.json"),
        };
        assert!(ambient_doc(&args).is_err());
        let ok = AmbientArgs { radius: 2.0, ..args };
        let doc = ambient_doc(&ok).unwrap();
        assert_eq!(doc["shapes"].as_array().unwrap().len(), 3);
    }
}
