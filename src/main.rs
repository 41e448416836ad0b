use ampel::{Phase, TrafficLight};

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let mut light = TrafficLight::default();
  light.start()?;

  println!("Light is {}", light.current_phase());
  light.wait_for_phase(Phase::Green);
  println!("Light is {}, go", light.current_phase());

  loop {
    println!("Light is {}", light.next_change());
  }
}
