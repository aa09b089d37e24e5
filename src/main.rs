// src/main.rs

use std::sync::Arc;

use log::{error, info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopWindowTarget, EventLoop},
    window::WindowBuilder,
};
use planar_graph_viz::app::{AppError, GraphApp};
use planar_graph_viz::config::AppConfig;

pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(config.window.width, config.window.height))
            .build(&event_loop)?,
    );

    let mut app_state = GraphApp::new(window.clone(), config).await?;
    let mut last_time = std::time::Instant::now();
    info!("window ready");

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    match event {
                        WindowEvent::CloseRequested => {
                            target.exit();
                        }
                        WindowEvent::Resized(physical_size) => {
                            app_state.resize(*physical_size);
                        }
                        WindowEvent::ScaleFactorChanged { .. } => {
                            app_state.resize(window.inner_size());
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                let now = std::time::Instant::now();
                let dt = (now - last_time).as_secs_f32();
                last_time = now;

                app_state.update(dt);
                match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        warn!("surface lost or outdated, reconfiguring");
                        app_state.resize(app_state.get_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("WGPU Out Of Memory! Exiting.");
                        target.exit();
                    }
                    Err(e) => warn!("Surface error: {:?}", e),
                }

                if !target.exiting() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = AppConfig::from_env();
    if let Err(e) = run(config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
