/*
[INPUT]:  Serial link configuration and sensor/actuator requests
[OUTPUT]: Sensor states and actuator side effects on the desk microcontroller
[POS]:    Serial layer - microcontroller communication
[UPDATE]: When adding commands or changing link behavior
*/

pub mod client;
pub mod protocol;

pub use client::{open_port, SensorClient, SensorBus, SerialConfig};
pub use protocol::{ActuatorCommand, SensorName, SensorResponse};
