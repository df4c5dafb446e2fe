//! Library bootstrap.
//!
//! The map engine has to be in place before geodrawer loads. The egui layer is
//! added on demand, and `geodrawer-loaded` is emitted once, on the first frame
//! where the egui context can be used.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use crate::constants::READY_EVENT;
use crate::dispatcher::EventDispatcher;
use crate::error::GeodrawerError;
use crate::map::MapPlugin;

#[derive(Resource, Default)]
pub struct LoaderState {
    pub ready_emitted: bool,
}

/// Fails unless the map engine plugin has been added to the app
pub fn check_map_engine(app: &App) -> Result<(), GeodrawerError> {
    if app.is_plugin_added::<MapPlugin>() {
        Ok(())
    } else {
        info!("geodrawer: the map engine must be loaded at this point!");
        Err(GeodrawerError::MissingMapEngine)
    }
}

pub fn load(app: &mut App) -> Result<(), GeodrawerError> {
    check_map_engine(app)?;

    if !app.is_plugin_added::<EguiPlugin>() {
        info!("geodrawer: loading egui");
        app.add_plugins(EguiPlugin::default());
    }

    app.init_resource::<EventDispatcher>()
        .init_resource::<LoaderState>()
        .add_systems(EguiPrimaryContextPass, emit_ready);
    Ok(())
}

/// Run `callback` once the library is ready
pub fn ready(
    app: &mut App,
    callback: impl Fn() + Send + Sync + 'static,
) -> Result<(), GeodrawerError> {
    app.init_resource::<EventDispatcher>();
    app.world_mut()
        .resource_mut::<EventDispatcher>()
        .register(READY_EVENT, move |_, _| callback());
    load(app)
}

fn emit_ready(
    mut contexts: EguiContexts,
    mut state: ResMut<LoaderState>,
    dispatcher: Res<EventDispatcher>,
) {
    if state.ready_emitted || contexts.ctx_mut().is_err() {
        return;
    }
    state.ready_emitted = true;
    info!("geodrawer: library is ready");
    dispatcher.emit(READY_EVENT, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_requires_map_engine() {
        let mut app = App::new();
        assert!(matches!(
            load(&mut app),
            Err(GeodrawerError::MissingMapEngine)
        ));
    }

    #[test]
    fn test_ready_registers_before_failing() {
        let mut app = App::new();
        let result = ready(&mut app, || {});
        assert!(result.is_err());
        assert_eq!(
            app.world()
                .resource::<EventDispatcher>()
                .listener_count(READY_EVENT),
            1
        );
    }
}
