// Initialize tracing subscriber for tests (idempotent)
#[cfg(feature = "tracing")]
pub fn init_tracing() {
   use std::sync::Once;
   static INIT: Once = Once::new();
   INIT.call_once(|| {
      tracing_subscriber::fmt()
         .with_test_writer()
         .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
         .try_init()
         .ok();
   });
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {}
