use super::{
    brightness::{BridgeError, BrightnessBridge},
    codec::*,
};
use crate::{
    channel::{spawn_server, ChannelError, ChannelPort, Server},
    external::{
        dependency_provider::DependencyProvider, permission::PermissionNavigator,
        settings::SettingsStore, window::DisplaySurface,
    },
};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

type Handler<S, W, N> = fn(&BrightnessBridge<S, W, N>, &Value) -> MethodResponse;

fn respond(result: Result<Value, BridgeError>) -> MethodResponse {
    match result {
        Ok(v) => MethodResponse::Success(v),
        Err(e) => MethodResponse::Error {
            code: e.code(),
            message: e.to_string(),
        },
    }
}

fn handle_set_system_brightness<S, W, N>(
    bridge: &BrightnessBridge<S, W, N>,
    argument: &Value,
) -> MethodResponse
where
    S: SettingsStore,
    W: DisplaySurface,
    N: PermissionNavigator,
{
    let result = match argument.as_f64() {
        Some(level) => bridge.set_system_brightness(level).map(Value::Bool),
        None => Err(BridgeError::Brightness(
            "brightness argument must be a number".to_owned(),
        )),
    };
    respond(result)
}

fn handle_get_brightness<S, W, N>(bridge: &BrightnessBridge<S, W, N>, _: &Value) -> MethodResponse
where
    S: SettingsStore,
    W: DisplaySurface,
    N: PermissionNavigator,
{
    respond(Ok(Value::from(bridge.get_brightness())))
}

fn handle_reset_system_brightness<S, W, N>(
    bridge: &BrightnessBridge<S, W, N>,
    _: &Value,
) -> MethodResponse
where
    S: SettingsStore,
    W: DisplaySurface,
    N: PermissionNavigator,
{
    respond(bridge.reset_system_brightness().map(Value::Bool))
}

fn handle_has_brightness_permission<S, W, N>(
    bridge: &BrightnessBridge<S, W, N>,
    _: &Value,
) -> MethodResponse
where
    S: SettingsStore,
    W: DisplaySurface,
    N: PermissionNavigator,
{
    respond(Ok(Value::Bool(bridge.has_brightness_permission())))
}

fn handle_request_brightness_permission<S, W, N>(
    bridge: &BrightnessBridge<S, W, N>,
    _: &Value,
) -> MethodResponse
where
    S: SettingsStore,
    W: DisplaySurface,
    N: PermissionNavigator,
{
    respond(Ok(Value::Bool(bridge.request_brightness_permission())))
}

fn handle_keep_screen_on<S, W, N>(
    bridge: &BrightnessBridge<S, W, N>,
    argument: &Value,
) -> MethodResponse
where
    S: SettingsStore,
    W: DisplaySurface,
    N: PermissionNavigator,
{
    bridge.keep_screen_on(argument.as_bool().unwrap_or(false));
    respond(Ok(Value::Null))
}

/// Serves a [BrightnessBridge] on a channel, routing each [MethodCall] to the
/// handler registered under its method name.
pub struct BridgeServer<S: SettingsStore, W: DisplaySurface, N: PermissionNavigator> {
    channel: String,
    bridge: BrightnessBridge<S, W, N>,
    handlers: HashMap<&'static str, Handler<S, W, N>>,
}

impl<S: SettingsStore, W: DisplaySurface, N: PermissionNavigator> BridgeServer<S, W, N> {
    /// A server for `bridge`, logging under the `channel` name
    pub fn new(channel: &str, bridge: BrightnessBridge<S, W, N>) -> BridgeServer<S, W, N> {
        let mut handlers: HashMap<&'static str, Handler<S, W, N>> = HashMap::new();
        handlers.insert(SET_SYSTEM_BRIGHTNESS, handle_set_system_brightness);
        handlers.insert(GET_BRIGHTNESS, handle_get_brightness);
        handlers.insert(RESET_SYSTEM_BRIGHTNESS, handle_reset_system_brightness);
        handlers.insert(HAS_BRIGHTNESS_PERMISSION, handle_has_brightness_permission);
        handlers.insert(
            REQUEST_BRIGHTNESS_PERMISSION,
            handle_request_brightness_permission,
        );
        handlers.insert(KEEP_SCREEN_ON, handle_keep_screen_on);
        BridgeServer {
            channel: channel.to_owned(),
            bridge,
            handlers,
        }
    }

    /// A server for a bridge over the provider's capabilities
    pub fn from_provider(channel: &str, provider: &DependencyProvider<S, W, N>) -> Self {
        BridgeServer::new(
            channel,
            BrightnessBridge::new(
                provider.get_settings_store(),
                provider.get_display_surface(),
                provider.get_permission_navigator(),
            ),
        )
    }

    /// Route a call to its handler, synchronously.
    pub fn dispatch(&self, call: &MethodCall) -> MethodResponse {
        log::debug!(
            "{}: {} called with {}",
            self.channel,
            call.method,
            call.argument
        );
        match self.handlers.get(call.method.as_str()) {
            Some(handler) => handler(&self.bridge, &call.argument),
            None => {
                log::warn!("{}: unknown method {}", self.channel, call.method);
                MethodResponse::NotImplemented
            }
        }
    }
}

#[async_trait]
impl<S, W, N> Server<MethodCall, MethodResponse> for BridgeServer<S, W, N>
where
    S: SettingsStore,
    W: DisplaySurface,
    N: PermissionNavigator,
{
    fn get_name(&self) -> String {
        format!("BridgeServer({})", self.channel)
    }

    async fn handle_message(&mut self, payload: MethodCall) -> Result<MethodResponse> {
        Ok(self.dispatch(&payload))
    }

    async fn initialize(&mut self) -> Result<()> {
        log::info!(
            "{}: write-settings permission {}",
            self.channel,
            if self.bridge.has_brightness_permission() {
                "granted"
            } else {
                "not granted"
            }
        );
        match self.bridge.brightness_mode() {
            Ok(mode) => log::info!("{}: system brightness mode {:?}", self.channel, mode),
            Err(e) => log::debug!("{}: brightness mode unknown: {}", self.channel, e),
        }
        Ok(())
    }

    async fn tear_down(&mut self) -> Result<()> {
        // Window attributes don't outlive the window the bridge was attached to
        Ok(self.bridge.release_window()?)
    }
}

/// The caller's end of a served bridge.
#[derive(Debug, Clone)]
pub struct BridgeChannel {
    name: String,
    port: ChannelPort<MethodCall, MethodResponse, anyhow::Error>,
}

impl BridgeChannel {
    /// Spawn a [BridgeServer] over the provider's capabilities and connect to it.
    pub async fn open<S, W, N>(name: &str, provider: &DependencyProvider<S, W, N>) -> Result<Self>
    where
        S: SettingsStore,
        W: DisplaySurface,
        N: PermissionNavigator,
    {
        let port = spawn_server(BridgeServer::from_provider(name, provider)).await?;
        Ok(BridgeChannel {
            name: name.to_owned(),
            port,
        })
    }

    /// Name the channel is served under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call `method` with `argument` and wait for the response
    pub async fn invoke(
        &self,
        method: &str,
        argument: Value,
    ) -> Result<MethodResponse, ChannelError<anyhow::Error>> {
        self.call(MethodCall::new(method, argument)).await
    }

    /// Send an already built [MethodCall] and wait for the response
    pub async fn call(
        &self,
        call: MethodCall,
    ) -> Result<MethodResponse, ChannelError<anyhow::Error>> {
        self.port.request(call).await
    }

    /// Close this end and wait for the server to tear down, which only
    /// happens once all clones are closed.
    pub async fn close(self) {
        self.port.await_shutdown().await
    }
}
