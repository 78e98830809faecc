pub mod common;




#[cfg(test)]
mod test_boss_phases;

#[cfg(test)]
mod test_ninja;
