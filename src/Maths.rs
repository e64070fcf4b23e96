/// exact Gauss–Jordan reduction over rationals and the helpers used to extract null spaces
pub mod reduced_echelon;
