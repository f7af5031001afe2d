use maze_flow::{context::Context, flow, render::LogRenderer, scene::MazeScene};

fn main() -> anyhow::Result<()> {
    let ctx = Context::default();
    let scene = MazeScene::new(&ctx)?;
    flow::run(ctx, scene, LogRenderer::default())
}
